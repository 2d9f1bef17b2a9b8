/// Multipart image extraction
use crate::{
    error::{Result, ServerError},
    services::FileStorage,
};
use axum::http::{header, HeaderMap};
use bytes::Bytes;

/// A single uploaded file pulled out of a multipart body
#[derive(Debug)]
pub struct UploadedFile {
    pub content_type: String,
    pub data: Bytes,
}

/// Read the part named `field` from a `multipart/form-data` body
pub async fn read_file_field(headers: &HeaderMap, body: Bytes, field: &str) -> Result<UploadedFile> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| ServerError::BadRequest("Missing Content-Type".to_string()))?;

    let boundary = multer::parse_boundary(content_type)
        .map_err(|e| ServerError::BadRequest(format!("Expected multipart/form-data: {}", e)))?;

    // Convert Bytes to a stream for multer
    let stream = futures_util::stream::once(async move { Ok::<_, std::io::Error>(body) });
    let mut multipart = multer::Multipart::new(stream, boundary);

    while let Some(part) = multipart
        .next_field()
        .await
        .map_err(|e| ServerError::BadRequest(format!("Failed to parse multipart: {}", e)))?
    {
        if part.name() != Some(field) {
            continue;
        }

        let content_type = FileStorage::resolve_content_type(
            part.content_type().map(|mime| mime.essence_str()),
            part.file_name(),
        )
        .ok_or_else(|| ServerError::BadRequest("Missing file content type".to_string()))?;

        let data = part
            .bytes()
            .await
            .map_err(|e| ServerError::BadRequest(format!("Failed to read file: {}", e)))?;

        return Ok(UploadedFile { content_type, data });
    }

    Err(ServerError::BadRequest(format!("Missing \"{}\" field", field)))
}
