use crate::routes::{auth, course, directory, health, hod, root, student};
use utoipa::{
    Modify, OpenApi,
    openapi::security::{ApiKey, ApiKeyValue, SecurityScheme},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let Some(components) = openapi.components.as_mut() else {
            return;
        };

        // Sent as `Authorization: Token <key>`
        components.add_security_scheme(
            "token",
            SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::with_description(
                "Authorization",
                "Token <key> as returned by /login",
            ))),
        );
    }
}

/// API Documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        root::root,
        health::health,
        auth::login,
        student::dashboard,
        student::update_enrollment,
        student::reports,
        student::register,
        hod::dashboard,
        hod::upload_courses,
        hod::upload_students,
        hod::approve_report,
        hod::reject_report,
        hod::grade_course,
        hod::register,
        directory::list_departments,
        directory::create_department,
        directory::list_programs,
        directory::create_program,
        directory::list_batches,
        directory::create_batch,
        course::list_courses,
        course::get_course,
        course::create_course
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Liveness endpoints"),
        (name = "Authentication", description = "Token issuance"),
        (name = "Students", description = "Student dashboard and semester enrollment"),
        (name = "Heads of department", description = "Department management, approvals and bulk uploads"),
        (name = "Directory", description = "Departments, programs and batches"),
        (name = "Courses", description = "Course catalog"),
        (name = "Registration", description = "Account creation"),
    ),
    info(
        title = "Enrollment API",
        version = "1.0.0",
        description = "Semester course enrollment for departments, programs and batches",
        license(
            name = "MIT OR Apache-2.0",
        )
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_document_lists_routes() {
        let doc = ApiDoc::openapi();
        for path in ["/login", "/student/dashboard", "/hod/dashboard", "/courses/{id}"] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }

        let components = doc.components.unwrap();
        assert!(components.security_schemes.contains_key("token"));
    }
}
