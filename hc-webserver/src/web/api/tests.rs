use serde_json::{json, Value};

use crate::web::tests::prelude::*;

fn body(response: LocalResponse) -> Value {
    serde_json::from_str(&response.into_string().unwrap()).unwrap()
}

fn test_json(r: &LocalResponse) {
    assert_eq!(
        r.headers().get("Content-Type").collect::<Vec<_>>()[0],
        "application/json"
    );
}

struct World {
    fixture: Fixture,
    creator: Member,
    provider: Member,
    outsider: Member,
}

impl World {
    fn new() -> Self {
        let fixture = Fixture::new();
        fixture.create_org("Alpha", "alpha.org");
        let creator = fixture.create_member("alice", "alice@alpha.org");
        let provider = fixture.create_member("bob", "bob@alpha.org");
        let outsider = fixture.create_member("eve", "eve@example.com");
        Self {
            fixture,
            creator,
            provider,
            outsider,
        }
    }

    fn client(&self) -> &Client {
        &self.fixture.client
    }

    fn org_id(&self) -> String {
        let org = self
            .fixture
            .connections
            .shared()
            .unwrap()
            .transaction(|db| {
                use hc_core::repositories::MembershipRepo as _;
                db.memberships_of_user(&self.creator.user.id)
            })
            .unwrap();
        org[0].organization_id.to_string()
    }

    fn post_request(&self, visibility: &str) -> Value {
        let response = self
            .client()
            .post("/requests")
            .header(ContentType::JSON)
            .header(self.creator.auth())
            .body(
                json!({
                    "organization_id": self.org_id(),
                    "title": "Green tea",
                    "destination": { "city": "Paris", "lat": 48.8566, "lng": 2.3522 },
                    "size": "small",
                    "visibility": visibility,
                })
                .to_string(),
            )
            .dispatch();
        assert_eq!(response.status(), Status::Ok);
        test_json(&response);
        body(response)
    }
}

#[test]
fn site_status_is_public() {
    let fixture = Fixture::new();
    let response = fixture.client.get("/site/status").dispatch();
    assert_eq!(response.status(), Status::Ok);
    let status = body(response);
    assert_eq!(status["status"], "ok");
    assert_eq!(status["version"], DUMMY_VERSION);
}

#[test]
fn requests_without_token_are_rejected() {
    let fixture = Fixture::new();
    let response = fixture.client.get("/requests").dispatch();
    assert_eq!(response.status(), Status::Unauthorized);
    test_json(&response);
    let error = body(response);
    assert_eq!(error["http_status"], 401);
    assert_eq!(error["key"], "not_authenticated");

    let response = fixture
        .client
        .get("/requests")
        .header(Header::new("Authorization", "Bearer invalid"))
        .dispatch();
    assert_eq!(response.status(), Status::Unauthorized);
    assert_eq!(body(response)["key"], "token.invalid");
}

#[test]
fn create_and_list_requests() {
    let world = World::new();
    let request = world.post_request("all");
    assert_eq!(request["status"], "open");
    assert_eq!(request["visibility"], "all");
    let id = request["id"].as_str().unwrap();

    let response = world
        .client()
        .get(format!("/requests/{id}"))
        .header(world.provider.auth())
        .dispatch();
    assert_eq!(response.status(), Status::Ok);
    assert_eq!(body(response)["title"], "Green tea");

    let response = world
        .client()
        .get("/requests?q=tea")
        .header(world.outsider.auth())
        .dispatch();
    assert_eq!(response.status(), Status::Ok);
    let list = body(response);
    assert_eq!(list.as_array().unwrap().len(), 1);
    assert_eq!(list[0]["id"], id);

    let response = world
        .client()
        .get("/requests?q=coffee")
        .header(world.outsider.auth())
        .dispatch();
    assert!(body(response).as_array().unwrap().is_empty());
}

#[test]
fn hidden_requests_are_not_found() {
    let world = World::new();
    let request = world.post_request("same_organization");
    let id = request["id"].as_str().unwrap();
    let response = world
        .client()
        .get(format!("/requests/{id}"))
        .header(world.outsider.auth())
        .dispatch();
    assert_eq!(response.status(), Status::NotFound);
    assert_eq!(body(response)["key"], "not_found");
}

#[test]
fn malformed_ids_are_bad_input() {
    let world = World::new();
    let response = world
        .client()
        .get("/requests/not-an-id")
        .header(world.creator.auth())
        .dispatch();
    assert_eq!(response.status(), Status::BadRequest);
    assert_eq!(body(response)["key"], "invalid_id_format");

    let response = world
        .client()
        .get("/requests?status=lost")
        .header(world.creator.auth())
        .dispatch();
    assert_eq!(response.status(), Status::BadRequest);
}

#[test]
fn accept_an_offer_and_report_stale_transitions() {
    let world = World::new();
    let request = world.post_request("all");
    let id = request["id"].as_str().unwrap();

    let response = world
        .client()
        .post(format!("/requests/{id}/offers"))
        .header(ContentType::JSON)
        .header(world.provider.auth())
        .body(r#""add""#)
        .dispatch();
    assert_eq!(response.status(), Status::Ok);

    let response = world
        .client()
        .get(format!("/requests/{id}/offers"))
        .header(world.creator.auth())
        .dispatch();
    let provider_id = world.provider.user.id.to_string();
    assert_eq!(body(response), json!([provider_id]));

    let accept = json!({ "status": "accepted", "provider_id": provider_id }).to_string();
    let response = world
        .client()
        .put(format!("/requests/{id}/status"))
        .header(ContentType::JSON)
        .header(world.creator.auth())
        .body(&accept)
        .dispatch();
    assert_eq!(response.status(), Status::Ok);
    let accepted = body(response);
    assert_eq!(accepted["status"], "accepted");
    assert_eq!(accepted["provider_id"], provider_id);

    let response = world
        .client()
        .put(format!("/requests/{id}/status"))
        .header(ContentType::JSON)
        .header(world.creator.auth())
        .body(&accept)
        .dispatch();
    assert_eq!(response.status(), Status::Conflict);
    assert_eq!(body(response)["key"], "request.stale_status");

    let response = world
        .client()
        .put(format!("/requests/{id}/status"))
        .header(ContentType::JSON)
        .header(world.creator.auth())
        .body(r#"{"status":"completed"}"#)
        .dispatch();
    assert_eq!(response.status(), Status::BadRequest);
    assert_eq!(body(response)["key"], "request.illegal_transition");

    let response = world
        .client()
        .get(format!("/requests/{id}/history"))
        .header(world.creator.auth())
        .dispatch();
    let history = body(response);
    assert_eq!(history[0]["new_status"], "accepted");
}

#[test]
fn update_clears_optional_fields() {
    let world = World::new();
    let request = world.post_request("all");
    let id = request["id"].as_str().unwrap();
    let response = world
        .client()
        .put(format!("/requests/{id}"))
        .header(ContentType::JSON)
        .header(world.creator.auth())
        .body(r#"{"title":"Black tea","kilograms":2.5}"#)
        .dispatch();
    assert_eq!(response.status(), Status::Ok);
    assert_eq!(body(response)["kilograms"], 2.5);

    let response = world
        .client()
        .put(format!("/requests/{id}"))
        .header(ContentType::JSON)
        .header(world.creator.auth())
        .body(r#"{"kilograms":null}"#)
        .dispatch();
    let updated = body(response);
    assert_eq!(updated["title"], "Black tea");
    assert!(updated.get("kilograms").is_none());

    let response = world
        .client()
        .put(format!("/requests/{id}"))
        .header(ContentType::JSON)
        .header(world.creator.auth())
        .body(r#"{"origin":{"city":"Lyon","lat":45.764,"lng":4.8357}}"#)
        .dispatch();
    assert_eq!(response.status(), Status::Ok);
    assert_eq!(body(response)["origin"]["city"], "Lyon");
    let response = world
        .client()
        .put(format!("/requests/{id}"))
        .header(ContentType::JSON)
        .header(world.creator.auth())
        .body(r#"{"origin":null}"#)
        .dispatch();
    assert_eq!(response.status(), Status::Ok);
    assert!(body(response).get("origin").is_none());

    let response = world
        .client()
        .put(format!("/requests/{id}"))
        .header(ContentType::JSON)
        .header(world.provider.auth())
        .body(r#"{"title":"Hijacked"}"#)
        .dispatch();
    assert_eq!(response.status(), Status::Forbidden);
}

#[test]
fn invalid_json_is_unprocessable() {
    let world = World::new();
    let response = world
        .client()
        .post("/requests")
        .header(ContentType::JSON)
        .header(world.creator.auth())
        .body(r#"{"title":42}"#)
        .dispatch();
    assert_eq!(response.status(), Status::UnprocessableEntity);
    assert_eq!(body(response)["key"], "unprocessable");
}

#[test]
fn delete_request_of_creator() {
    let world = World::new();
    let request = world.post_request("all");
    let id = request["id"].as_str().unwrap();
    let response = world
        .client()
        .delete(format!("/requests/{id}"))
        .header(world.provider.auth())
        .dispatch();
    assert_eq!(response.status(), Status::Forbidden);
    let response = world
        .client()
        .delete(format!("/requests/{id}"))
        .header(world.creator.auth())
        .dispatch();
    assert_eq!(response.status(), Status::Ok);
    let response = world
        .client()
        .get(format!("/requests/{id}"))
        .header(world.creator.auth())
        .dispatch();
    assert_eq!(response.status(), Status::NotFound);
}

#[test]
fn messages_and_unread_threads() {
    let world = World::new();
    let request = world.post_request("all");
    let id = request["id"].as_str().unwrap();

    let response = world
        .client()
        .post("/messages")
        .header(ContentType::JSON)
        .header(world.provider.auth())
        .body(json!({ "request_id": id, "content": "I can bring it" }).to_string())
        .dispatch();
    assert_eq!(response.status(), Status::Ok);
    let message = body(response);
    let thread_id = message["thread_id"].as_str().unwrap().to_owned();

    let response = world
        .client()
        .get("/threads")
        .header(world.creator.auth())
        .dispatch();
    let threads = body(response);
    assert_eq!(threads[0]["id"], thread_id.as_str());
    assert_eq!(threads[0]["unread"], 1);
    assert_eq!(threads[0]["last_message"]["content"], "I can bring it");

    let response = world
        .client()
        .put(format!("/threads/{thread_id}/read"))
        .header(world.creator.auth())
        .dispatch();
    assert_eq!(response.status(), Status::Ok);

    let response = world
        .client()
        .get("/threads")
        .header(world.creator.auth())
        .dispatch();
    assert_eq!(body(response)[0]["unread"], 0);

    let response = world
        .client()
        .get(format!("/threads/{thread_id}/messages"))
        .header(world.outsider.auth())
        .dispatch();
    assert_eq!(response.status(), Status::NotFound);

    let response = world
        .client()
        .post("/messages")
        .header(ContentType::JSON)
        .header(world.provider.auth())
        .body(r#"{"content":"Nowhere"}"#)
        .dispatch();
    assert_eq!(response.status(), Status::BadRequest);

    world.fixture.wait_idle();
    assert!(world.fixture.notifications.count() > 0);
}

#[test]
fn manage_watches() {
    let world = World::new();
    let response = world
        .client()
        .post("/watches")
        .header(ContentType::JSON)
        .header(world.provider.auth())
        .body("{}")
        .dispatch();
    assert_eq!(response.status(), Status::BadRequest);
    assert_eq!(body(response)["key"], "watch.no_criteria");

    let response = world
        .client()
        .post("/watches")
        .header(ContentType::JSON)
        .header(world.provider.auth())
        .body(r#"{"name":"Tea","search_text":"tea"}"#)
        .dispatch();
    assert_eq!(response.status(), Status::Ok);
    let watch_id = body(response)["id"].as_str().unwrap().to_owned();

    let response = world
        .client()
        .get("/watches")
        .header(world.provider.auth())
        .dispatch();
    assert_eq!(body(response).as_array().unwrap().len(), 1);

    let response = world
        .client()
        .delete(format!("/watches/{watch_id}"))
        .header(world.creator.auth())
        .dispatch();
    assert_eq!(response.status(), Status::NotFound);

    let response = world
        .client()
        .delete(format!("/watches/{watch_id}"))
        .header(world.provider.auth())
        .dispatch();
    assert_eq!(response.status(), Status::Ok);

    let response = world
        .client()
        .get("/watches")
        .header(world.provider.auth())
        .dispatch();
    assert!(body(response).as_array().unwrap().is_empty());
}

#[test]
fn upload_a_file() {
    let world = World::new();
    let payload = b"\x89PNG fake image";
    let mut data = Vec::new();
    data.extend_from_slice(
        b"--BOUNDARY\r\n\
          Content-Disposition: form-data; name=\"file\"; filename=\"photo.PNG\"\r\n\
          Content-Type: image/png\r\n\r\n",
    );
    data.extend_from_slice(payload);
    data.extend_from_slice(b"\r\n--BOUNDARY--\r\n");
    let response = world
        .client()
        .post("/upload")
        .header(ContentType::new("multipart", "form-data").with_params(("boundary", "BOUNDARY")))
        .header(world.creator.auth())
        .body(data)
        .dispatch();
    assert_eq!(response.status(), Status::Ok);
    let file = body(response);
    let id = file["id"].as_str().unwrap();
    assert_eq!(file["filename"], "photo.PNG");
    assert_eq!(file["content_type"], "image/png");
    assert_eq!(file["size"], payload.len());
    assert_eq!(file["url"], format!("http://files.test/{id}.png"));
    let stored = std::fs::read(world.fixture.files.path().join(format!("{id}.png"))).unwrap();
    assert_eq!(stored, payload);
}

#[test]
fn logout_revokes_the_token() {
    let world = World::new();
    let response = world
        .client()
        .get("/auth/logout")
        .header(world.creator.auth())
        .dispatch();
    assert_eq!(response.status(), Status::Ok);
    let response = world
        .client()
        .get("/requests")
        .header(world.creator.auth())
        .dispatch();
    assert_eq!(response.status(), Status::Unauthorized);
}

#[test]
fn housekeeping_needs_the_service_token() {
    let fixture = Fixture::new();
    let response = fixture
        .client
        .post("/service")
        .header(ContentType::JSON)
        .body(r#"{"job":"token_cleanup"}"#)
        .dispatch();
    assert_eq!(response.status(), Status::Unauthorized);

    let response = fixture
        .client
        .post("/service")
        .header(ContentType::JSON)
        .header(Header::new("Authorization", format!("Bearer {SERVICE_TOKEN}")))
        .body(r#"{"job":"vacuum"}"#)
        .dispatch();
    assert_eq!(response.status(), Status::BadRequest);

    for job in ["file_cleanup", "location_cleanup", "token_cleanup", "outdated_requests"] {
        let response = fixture
            .client
            .post("/service")
            .header(ContentType::JSON)
            .header(Header::new("Authorization", format!("Bearer {SERVICE_TOKEN}")))
            .body(json!({ "job": job }).to_string())
            .dispatch();
        assert_eq!(response.status(), Status::NoContent);
    }
}
