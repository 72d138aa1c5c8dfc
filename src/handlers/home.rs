use axum::response::Html;

pub const LANDING_PAGE: &str = r#"<!doctype html>
<title>Upload tester</title>
<h1>Convert .docx/.pdf &rarr; .txt</h1>
<form method="post" action="/api/upload" enctype="multipart/form-data">
  <input type="file" name="file" accept=".docx,.pdf" required>
  <button type="submit">Upload</button>
</form>
<p>Health: <a href="/ping">/ping</a></p>
"#;

/// Static upload form for trying the service from a browser.
pub async fn landing_handler() -> Html<&'static str> {
    Html(LANDING_PAGE)
}
