use reqwest::header;

pub static CONTENT_TYPE: &str = "application/json; charset=utf-8";
pub static ACCEPT: &str = "application/json";

pub fn get_common_header(token: &str) -> header::HeaderMap {
    let mut headers = header::HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, CONTENT_TYPE.parse().unwrap());
    headers.insert(header::ACCEPT, ACCEPT.parse().unwrap());
    if let Ok(auth) = format!("Bearer {}", token).parse() {
        headers.insert(header::AUTHORIZATION, auth);
    }
    headers
}
