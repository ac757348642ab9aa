use base64::Engine;
use octocrab::Octocrab;
use secrecy::SecretString;
use serde_json::json;
use wiremock::matchers::{method, path, path_regex, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::create_github_client;
use crate::tests::event::default_repo_name;

// Mocks for specific users and files are mounted with the default priority and thus
// take precedence over these.
const FALLBACK_PRIORITY: u8 = 10;

/// Simulates the GitHub REST API for the default repository.
pub struct GitHubMockServer {
    mock_server: MockServer,
}

impl GitHubMockServer {
    pub async fn start() -> Self {
        let mock_server = MockServer::start().await;
        let repo = default_repo_name();
        let repo_route = format!("^/repos/{}/{}", repo.owner(), repo.name());

        let fallbacks = [
            ("GET", format!("{repo_route}/contents/.+$"), not_found()),
            ("GET", r"^/orgs/[^/]+/members/[^/]+$".to_string(), not_found()),
            ("GET", format!("{repo_route}/collaborators/[^/]+$"), not_found()),
            (
                "GET",
                format!(r"{repo_route}/pulls/\d+/reviews$"),
                ResponseTemplate::new(200).set_body_json(json!([])),
            ),
            (
                "POST",
                format!(r"{repo_route}/pulls/\d+/reviews$"),
                ResponseTemplate::new(200).set_body_json(json!({ "id": 1 })),
            ),
            (
                "PUT",
                format!(r"{repo_route}/pulls/\d+/reviews/\d+/dismissals$"),
                ResponseTemplate::new(200).set_body_json(json!({ "id": 1 })),
            ),
            (
                "POST",
                format!(r"{repo_route}/issues/\d+/comments$"),
                ResponseTemplate::new(201).set_body_json(json!({ "id": 1 })),
            ),
            (
                "GET",
                format!(r"{repo_route}/issues/\d+/labels$"),
                ResponseTemplate::new(200).set_body_json(json!([])),
            ),
            (
                "POST",
                format!(r"{repo_route}/issues/\d+/labels$"),
                ResponseTemplate::new(200).set_body_json(json!([])),
            ),
            (
                "DELETE",
                format!(r"{repo_route}/issues/\d+/labels/[^/]+$"),
                ResponseTemplate::new(200).set_body_json(json!([])),
            ),
        ];
        for (http_method, route, response) in fallbacks {
            Mock::given(method(http_method))
                .and(path_regex(route))
                .respond_with(response)
                .with_priority(FALLBACK_PRIORITY)
                .mount(&mock_server)
                .await;
        }

        Self { mock_server }
    }

    pub fn client(&self) -> Octocrab {
        create_github_client(
            SecretString::new("gh-token".to_string()),
            &self.mock_server.uri(),
        )
        .unwrap()
    }

    pub async fn owners_file(self, content: &str) -> Self {
        let repo = default_repo_name();
        Mock::given(method("GET"))
            .and(path(format!("/repos/{repo}/contents/OWNERS")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "type": "file",
                "name": "OWNERS",
                "path": "OWNERS",
                "encoding": "base64",
                "content": base64::prelude::BASE64_STANDARD.encode(content),
            })))
            .mount(&self.mock_server)
            .await;
        self
    }

    pub async fn org_member(self, username: &str) -> Self {
        let org = default_repo_name();
        let org = org.owner();
        self.no_content(format!("/orgs/{org}/members/{username}"))
            .await
    }

    pub async fn collaborator(self, username: &str) -> Self {
        let repo = default_repo_name();
        self.no_content(format!("/repos/{repo}/collaborators/{username}"))
            .await
    }

    pub async fn failing_membership(self) -> Self {
        Mock::given(method("GET"))
            .and(path_regex(r"^/orgs/[^/]+/members/[^/]+$"))
            .respond_with(
                ResponseTemplate::new(500).set_body_json(json!({ "message": "Server Error" })),
            )
            .mount(&self.mock_server)
            .await;
        self
    }

    /// Reviews of a pull request, in the GitHub API format.
    pub async fn reviews(self, pr: u64, reviews: serde_json::Value) -> Self {
        let repo = default_repo_name();
        Mock::given(method("GET"))
            .and(path(format!("/repos/{repo}/pulls/{pr}/reviews")))
            .respond_with(ResponseTemplate::new(200).set_body_json(reviews))
            .mount(&self.mock_server)
            .await;
        self
    }

    /// Reviews of a pull request split over two pages linked with a `Link` header.
    pub async fn review_pages(
        self,
        pr: u64,
        first: serde_json::Value,
        second: serde_json::Value,
    ) -> Self {
        let repo = default_repo_name();
        let route = format!("/repos/{repo}/pulls/{pr}/reviews");
        let next = format!(
            "<{}{route}?per_page=100&page=2>; rel=\"next\"",
            self.mock_server.uri()
        );
        Mock::given(method("GET"))
            .and(path(route.as_str()))
            .and(query_param("page", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(second))
            .with_priority(1)
            .mount(&self.mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path(route.as_str()))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("Link", next.as_str())
                    .set_body_json(first),
            )
            .mount(&self.mock_server)
            .await;
        self
    }

    pub async fn failing_review_creation(self) -> Self {
        let repo = default_repo_name();
        Mock::given(method("POST"))
            .and(path(format!("/repos/{repo}/pulls/1/reviews")))
            .respond_with(
                ResponseTemplate::new(502).set_body_json(json!({ "message": "Bad Gateway" })),
            )
            .mount(&self.mock_server)
            .await;
        self
    }

    pub async fn labels(self, pr: u64, labels: &[&str]) -> Self {
        let repo = default_repo_name();
        let labels: Vec<serde_json::Value> = labels
            .iter()
            .map(|label| json!({ "name": label }))
            .collect();
        Mock::given(method("GET"))
            .and(path(format!("/repos/{repo}/issues/{pr}/labels")))
            .respond_with(ResponseTemplate::new(200).set_body_json(labels))
            .mount(&self.mock_server)
            .await;
        self
    }

    /// JSON bodies of all received requests with the given method and path.
    /// Requests without a JSON body are represented by `null`.
    pub async fn requests(&self, http_method: &str, route: &str) -> Vec<serde_json::Value> {
        self.mock_server
            .received_requests()
            .await
            .unwrap_or_default()
            .into_iter()
            .filter(|request| {
                request.method.to_string() == http_method && request.url.path() == route
            })
            .map(|request| serde_json::from_slice(&request.body).unwrap_or_default())
            .collect()
    }

    async fn no_content(self, route: String) -> Self {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(204))
            .mount(&self.mock_server)
            .await;
        self
    }
}

fn not_found() -> ResponseTemplate {
    ResponseTemplate::new(404).set_body_json(json!({
        "message": "Not Found",
        "documentation_url": "https://docs.github.com/rest"
    }))
}
