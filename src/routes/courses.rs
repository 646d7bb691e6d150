use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::models::courses::requests::{
    CourseQueryParams, CreateCourseBody, PrerequisitesRequest, UpdateCourseBody,
};
use crate::services::CourseService;
use crate::utils::SafeCourseCode;

// 懒加载的全局 COURSE_SERVICE 实例
static COURSE_SERVICE: Lazy<CourseService> = Lazy::new(CourseService::new_lazy);

// HTTP处理程序
pub async fn list_courses(
    req: HttpRequest,
    query: web::Query<CourseQueryParams>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.list_courses(&req, query.into_inner()).await
}

pub async fn list_all_courses(req: HttpRequest) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.list_all_courses(&req).await
}

pub async fn create_course(
    req: HttpRequest,
    body: web::Json<CreateCourseBody>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE
        .create_course(&req, body.into_inner().course)
        .await
}

pub async fn get_course(req: HttpRequest, code: SafeCourseCode) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.get_course(&req, code.0).await
}

pub async fn update_course(
    req: HttpRequest,
    code: SafeCourseCode,
    body: web::Json<UpdateCourseBody>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE
        .update_course(&req, code.0, body.into_inner().course)
        .await
}

pub async fn delete_course(req: HttpRequest, code: SafeCourseCode) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.delete_course(&req, code.0).await
}

pub async fn add_prerequisites(
    req: HttpRequest,
    code: SafeCourseCode,
    body: web::Json<PrerequisitesRequest>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE
        .add_prerequisites(&req, code.0, body.into_inner())
        .await
}

pub async fn replace_prerequisites(
    req: HttpRequest,
    code: SafeCourseCode,
    body: web::Json<PrerequisitesRequest>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE
        .replace_prerequisites(&req, code.0, body.into_inner())
        .await
}

// 配置路由
pub fn configure_course_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/course")
            .service(
                web::resource("")
                    .route(web::get().to(list_courses))
                    .route(web::post().to(create_course)),
            )
            // 固定路径需注册在 /{course_code} 之前
            .service(web::resource("/all").route(web::get().to(list_all_courses)))
            .service(
                web::resource("/prerequisite/{course_code}")
                    .route(web::post().to(add_prerequisites))
                    .route(web::patch().to(replace_prerequisites)),
            )
            .service(
                web::resource("/{course_code}")
                    .route(web::get().to(get_course))
                    .route(web::patch().to(update_course))
                    .route(web::delete().to(delete_course)),
            ),
    );
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::test;
    use serde_json::{Value, json};

    fn course_body(code: &str, departments: &[&str], prerequisites: &[&str]) -> Value {
        json!({
            "course": {
                "code": code,
                "name": { "ar": "مقرر", "en": format!("Course {code}") },
                "description": { "ar": "وصف", "en": "Description" },
                "departments": departments,
                "prerequisites": prerequisites,
                "creditHours": 3,
                "courseType": "compulsory"
            }
        })
    }

    fn department_body(code: &str) -> Value {
        json!({
            "department": {
                "code": code,
                "name": { "ar": "قسم", "en": format!("Department {code}") },
                "capacity": 100,
                "program": "general"
            }
        })
    }

    macro_rules! post {
        ($app:expr, $uri:expr, $body:expr) => {{
            let req = test::TestRequest::post()
                .uri($uri)
                .set_json($body)
                .to_request();
            test::call_service(&$app, req).await
        }};
    }

    macro_rules! patch {
        ($app:expr, $uri:expr, $body:expr) => {{
            let req = test::TestRequest::patch()
                .uri($uri)
                .set_json($body)
                .to_request();
            test::call_service(&$app, req).await
        }};
    }

    macro_rules! get {
        ($app:expr, $uri:expr) => {{
            let req = test::TestRequest::get().uri($uri).to_request();
            test::call_service(&$app, req).await
        }};
    }

    #[actix_web::test]
    async fn test_create_returns_denormalized_view() {
        let app = init_test_app!();
        post!(app, "/department", department_body("CS"));
        post!(app, "/department", department_body("IS"));
        post!(app, "/course", course_body("CS101", &[], &[]));

        let resp = post!(app, "/course", course_body("CS201", &["CS", "IS"], &["CS101"]));
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "Course created successfully");
        assert_eq!(body["course"]["creditHours"], 3);
        assert_eq!(body["course"]["courseType"], "compulsory");

        let resp = get!(app, "/course/CS201");
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        let course = &body["course"];
        assert_eq!(course["departments"].as_array().unwrap().len(), 2);
        assert_eq!(course["departments"][0]["code"], "CS");
        assert_eq!(course["departments"][1]["name"]["en"], "Department IS");
        assert_eq!(course["prerequisites"].as_array().unwrap().len(), 1);
        assert_eq!(course["prerequisites"][0]["code"], "CS101");
        assert_eq!(course["prerequisites"][0]["name"]["en"], "Course CS101");
        assert!(course.get("id").is_none());
    }

    #[actix_web::test]
    async fn test_duplicate_code_leaves_count_unchanged() {
        let app = init_test_app!();
        post!(app, "/course", course_body("CS101", &[], &[]));

        let resp = post!(app, "/course", course_body("CS101", &[], &[]));
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert!(
            body["error"]["message"]
                .as_str()
                .unwrap()
                .contains("already exists")
        );

        let body: Value = test::read_body_json(get!(app, "/course")).await;
        assert_eq!(body["total"], 1);
    }

    #[actix_web::test]
    async fn test_unknown_department_creates_nothing() {
        let app = init_test_app!();
        post!(app, "/department", department_body("CS"));

        let resp = post!(app, "/course", course_body("CS101", &["CS", "XX", "YY1"], &[]));
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["departments"], json!(["XX", "YY1"]));

        let resp = get!(app, "/course/CS101");
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(get!(app, "/course")).await;
        assert_eq!(body["total"], 0);
    }

    #[actix_web::test]
    async fn test_unknown_prerequisite_is_named() {
        let app = init_test_app!();

        let resp = post!(app, "/course", course_body("CS201", &[], &["CS101"]));
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["prerequisites"], json!(["CS101"]));
    }

    #[actix_web::test]
    async fn test_self_prerequisite_is_rejected() {
        let app = init_test_app!();

        let resp = post!(app, "/course", course_body("CS101", &[], &["CS101"]));
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        post!(app, "/course", course_body("CS101", &[], &[]));
        let resp = patch!(
            app,
            "/course/CS101",
            json!({ "course": { "prerequisites": ["CS101"] } })
        );
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_invalid_fields_are_rejected() {
        let app = init_test_app!();

        let resp = post!(app, "/course", course_body("cs101", &[], &[]));
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let mut body = course_body("CS101", &[], &[]);
        body["course"]["creditHours"] = json!(7);
        let resp = post!(app, "/course", &body);
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let mut body = course_body("CS101", &[], &[]);
        body["course"]["courseType"] = json!("optional");
        let resp = post!(app, "/course", &body);
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert!(body["error"]["code"].is_number());

        let mut body = course_body("CS101", &[], &[]);
        body["course"]["name"] = json!({ "en": "Intro" });
        let resp = post!(app, "/course", &body);
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_partial_update_merges_bilingual_fields() {
        let app = init_test_app!();
        let mut body = course_body("CS101", &[], &[]);
        body["course"]["name"] = json!({ "ar": "X", "en": "Y" });
        post!(app, "/course", &body);

        let resp = patch!(
            app,
            "/course/CS101",
            json!({ "course": { "name": { "en": "Z" }, "creditHours": 4 } })
        );
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "Course updated successfully");
        assert_eq!(body["course"]["name"], json!({ "ar": "X", "en": "Z" }));
        assert_eq!(body["course"]["creditHours"], 4);
        assert_eq!(body["course"]["description"]["en"], "Description");
    }

    #[actix_web::test]
    async fn test_update_replaces_relations() {
        let app = init_test_app!();
        post!(app, "/department", department_body("CS"));
        post!(app, "/department", department_body("MA"));
        for code in ["CS101", "CS102", "CS103"] {
            post!(app, "/course", course_body(code, &[], &[]));
        }
        post!(
            app,
            "/course",
            course_body("CS301", &["CS"], &["CS101", "CS102"])
        );

        let resp = patch!(
            app,
            "/course/CS301",
            json!({ "course": { "prerequisites": ["CS103"] } })
        );
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        let prerequisites: Vec<&str> = body["course"]["prerequisites"]
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["code"].as_str().unwrap())
            .collect();
        assert_eq!(prerequisites, vec!["CS103"]);
        // 未出现在请求中的院系关联保持不变
        assert_eq!(body["course"]["departments"][0]["code"], "CS");

        let resp = patch!(
            app,
            "/course/CS301",
            json!({ "course": { "departments": ["MA", "MA"] } })
        );
        let body: Value = test::read_body_json(resp).await;
        let departments = body["course"]["departments"].as_array().unwrap();
        assert_eq!(departments.len(), 1);
        assert_eq!(departments[0]["code"], "MA");
    }

    #[actix_web::test]
    async fn test_failed_update_changes_nothing() {
        let app = init_test_app!();
        post!(app, "/department", department_body("CS"));
        post!(app, "/course", course_body("CS101", &["CS"], &[]));

        let resp = patch!(
            app,
            "/course/CS101",
            json!({ "course": { "creditHours": 1, "departments": ["XX"] } })
        );
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: Value = test::read_body_json(get!(app, "/course/CS101")).await;
        assert_eq!(body["course"]["creditHours"], 3);
        assert_eq!(body["course"]["departments"][0]["code"], "CS");
    }

    #[actix_web::test]
    async fn test_update_rejects_code_change_and_unknown_course() {
        let app = init_test_app!();
        post!(app, "/course", course_body("CS101", &[], &[]));

        let resp = patch!(
            app,
            "/course/CS101",
            json!({ "course": { "code": "CS999" } })
        );
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let resp = patch!(
            app,
            "/course/CS404",
            json!({ "course": { "creditHours": 2 } })
        );
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_pagination_total_is_independent() {
        let app = init_test_app!();
        for code in ["CS103", "CS101", "CS102"] {
            post!(app, "/course", course_body(code, &[], &[]));
        }

        let body: Value = test::read_body_json(get!(app, "/course?skip=0&limit=2")).await;
        assert_eq!(body["total"], 3);
        let courses = body["courses"].as_array().unwrap();
        assert_eq!(courses.len(), 2);
        assert_eq!(courses[0]["code"], "CS101");
        assert_eq!(courses[1]["code"], "CS102");

        let body: Value = test::read_body_json(get!(app, "/course/all")).await;
        assert_eq!(body["courses"].as_array().unwrap().len(), 3);
    }

    #[actix_web::test]
    async fn test_list_filters_by_department() {
        let app = init_test_app!();
        post!(app, "/department", department_body("CS"));
        post!(app, "/department", department_body("MA"));
        post!(app, "/course", course_body("CS101", &["CS"], &[]));
        post!(app, "/course", course_body("MA101", &["MA"], &[]));

        let body: Value = test::read_body_json(get!(app, "/course?department=MA")).await;
        assert_eq!(body["total"], 1);
        assert_eq!(body["courses"][0]["code"], "MA101");

        let body: Value = test::read_body_json(get!(app, "/course?department=XX")).await;
        assert_eq!(body["total"], 0);
        assert_eq!(body["courses"], json!([]));
    }

    #[actix_web::test]
    async fn test_delete_then_fetch_returns_not_found() {
        let app = init_test_app!();
        post!(app, "/course", course_body("CS101", &[], &[]));
        post!(app, "/course", course_body("CS201", &[], &["CS101"]));

        let req = test::TestRequest::delete().uri("/course/CS101").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["course"]["code"], "CS101");

        let resp = get!(app, "/course/CS101");
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        // 引用被删课程的先修关联一并清理
        let body: Value = test::read_body_json(get!(app, "/course/CS201")).await;
        assert_eq!(body["course"]["prerequisites"], json!([]));

        let req = test::TestRequest::delete().uri("/course/CS101").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_add_prerequisites_endpoint() {
        let app = init_test_app!();
        for code in ["CS101", "CS102", "CS201"] {
            post!(app, "/course", course_body(code, &[], &[]));
        }

        let resp = post!(
            app,
            "/course/prerequisite/CS201",
            json!({ "prerequisites": ["CS101"] })
        );
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "Prerequisite(s) added successfully");
        assert_eq!(body["course"]["prerequisites"][0]["code"], "CS101");

        let resp = post!(
            app,
            "/course/prerequisite/CS201",
            json!({ "prerequisites": ["CS102", "CS101"] })
        );
        assert_eq!(resp.status(), StatusCode::CONFLICT);

        let resp = post!(
            app,
            "/course/prerequisite/CS201",
            json!({ "prerequisites": ["CS404"] })
        );
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["prerequisites"], json!(["CS404"]));

        let resp = post!(
            app,
            "/course/prerequisite/CS999",
            json!({ "prerequisites": ["CS101"] })
        );
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_replace_prerequisites_endpoint() {
        let app = init_test_app!();
        for code in ["CS101", "CS102"] {
            post!(app, "/course", course_body(code, &[], &[]));
        }
        post!(app, "/course", course_body("CS201", &[], &["CS101"]));

        let resp = patch!(
            app,
            "/course/prerequisite/CS201",
            json!({ "prerequisites": ["CS102"] })
        );
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "Prerequisite(s) updated successfully");
        let prerequisites = body["course"]["prerequisites"].as_array().unwrap();
        assert_eq!(prerequisites.len(), 1);
        assert_eq!(prerequisites[0]["code"], "CS102");

        let resp = patch!(
            app,
            "/course/prerequisite/CS201",
            json!({ "prerequisites": ["XX101"] })
        );
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[actix_web::test]
    async fn test_malformed_json_uses_error_envelope() {
        let app = init_test_app!();

        let req = test::TestRequest::post()
            .uri("/course")
            .insert_header(("content-type", "application/json"))
            .set_payload("{not json")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert!(body["error"]["message"].is_string());
        assert!(body.get("timestamp").is_some());
    }

    #[actix_web::test]
    async fn test_malformed_path_code() {
        let app = init_test_app!();

        let resp = get!(app, "/course/not-a-code");
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
