use axum::{
    Router,
    body::{Body, to_bytes},
};
use bookshelf_service::{config::PaginationConfig, create_memory_app};
use http::{Method, Request, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(body) => {
            request = request.header(header::CONTENT_TYPE, "application/json");
            Body::from(body.to_string())
        }
        None => Body::empty(),
    };
    let response = app
        .clone()
        .oneshot(request.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

/// Two authors and five books.
async fn library() -> Router {
    let app = create_memory_app(PaginationConfig {
        default_limit: 100,
        max_limit: 100,
    });

    let mut authors = Vec::new();
    for name in ["Robert Martin", "Martin Fowler"] {
        let (_, author) = send(&app, Method::POST, "/autores", Some(json!({ "name": name }))).await;
        authors.push(author["id"].as_str().unwrap().to_string());
    }

    for (title, publisher, pages, author) in [
        ("Clean Code", "Alura", Some(431), 0),
        ("Clean Architecture", "Casa do Código", Some(90), 0),
        ("The Clean Coder", "Alura", None, 0),
        ("Refactoring", "Casa do Código", Some(448), 1),
        ("UML Distilled", "Deus é bom e o diabo n presta", Some(208), 1),
    ] {
        let (status, _) = send(
            &app,
            Method::POST,
            "/livros",
            Some(json!({
                "title": title,
                "publisher": publisher,
                "pageCount": pages,
                "authorRef": authors[author],
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }
    app
}

async fn titles(app: &Router, uri: &str) -> Vec<String> {
    let (status, body) = send(app, Method::GET, uri, None).await;
    assert_eq!(status, StatusCode::OK, "{uri}: {body}");
    let mut titles: Vec<String> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|book| book["title"].as_str().unwrap().to_string())
        .collect();
    titles.sort();
    titles
}

#[tokio::test]
async fn no_criteria() {
    let app = library().await;
    assert_eq!(titles(&app, "/livros/busca").await.len(), 5);
    assert_eq!(titles(&app, "/livros").await.len(), 5);
}

#[tokio::test]
async fn publisher_and_title() {
    let app = library().await;
    assert_eq!(
        titles(&app, "/livros/busca?editora=alura").await,
        ["Clean Code", "The Clean Coder"]
    );
    assert_eq!(
        titles(&app, "/livros/busca?titulo=CLEAN&editora=").await,
        ["Clean Architecture", "Clean Code", "The Clean Coder"]
    );
}

#[tokio::test]
async fn page_range() {
    let app = library().await;
    assert_eq!(
        titles(&app, "/livros/busca?minPaginas=200").await,
        ["Clean Code", "Refactoring", "UML Distilled"]
    );
    assert_eq!(
        titles(&app, "/livros/busca?maxPages=100").await,
        ["Clean Architecture"]
    );
    assert_eq!(
        titles(&app, "/livros/busca?titulo=Clean&minPaginas=100").await,
        ["Clean Code"]
    );

    assert_eq!(
        titles(&app, "/livros/busca?minPaginas=99.5").await,
        ["Clean Code", "Refactoring", "UML Distilled"]
    );
    assert_eq!(
        titles(&app, "/livros/busca?maxPaginas=1e3").await,
        [
            "Clean Architecture",
            "Clean Code",
            "Refactoring",
            "UML Distilled"
        ]
    );

    let (status, body) = send(&app, Method::GET, "/livros/busca?minPaginas=muitas", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], 400);
}

#[tokio::test]
async fn author_name() {
    let app = library().await;
    assert_eq!(
        titles(&app, "/livros/busca?nomeAutor=Martin%20Fowler").await,
        ["Refactoring", "UML Distilled"]
    );
    assert_eq!(
        titles(&app, "/livros/busca?nomeAutor=Robert%20Martin&titulo=coder").await,
        ["The Clean Coder"]
    );
    assert!(
        titles(&app, "/livros/busca?nomeAutor=Nobody")
            .await
            .is_empty()
    );

    let (_, body) = send(&app, Method::GET, "/livros/busca?nomeAutor=Martin%20Fowler", None).await;
    for book in body.as_array().unwrap() {
        assert_eq!(book["author"]["name"], "Martin Fowler");
    }
}

#[tokio::test]
async fn paginated_search() {
    let app = library().await;
    let (_, body) = send(
        &app,
        Method::GET,
        "/livros/busca?ordenacao=pageCount:-1&limite=2&editora=a",
        None,
    )
    .await;
    let titles: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|book| book["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, ["Refactoring", "Clean Code"]);
}
