use serde::Serialize;

/// `generateContent` request envelope. Serialize-only: the provider's response
/// is relayed as opaque JSON and never deserialized into a struct.
#[derive(Debug, Serialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    pub generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
pub struct Content {
    pub parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Part {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inline_data")]
        inline_data: InlineData,
    },
}

/// Base64 payload plus its declared MIME type.
#[derive(Debug, Serialize)]
pub struct InlineData {
    #[serde(rename = "mime_type")]
    pub mime_type: String,
    pub data: String,
}

#[derive(Debug, Serialize)]
pub struct GenerationConfig {
    #[serde(rename = "responseModalities")]
    pub response_modalities: Vec<String>,
    #[serde(rename = "responseMimeType")]
    pub response_mime_type: String,
}

impl GenerateContentRequest {
    /// One text part (the prompt) and one inline-data part (the image),
    /// requesting image and text response modalities.
    pub fn image_edit(prompt: &str, image_base64: &str, mime_type: &str) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![
                    Part::Text {
                        text: prompt.to_owned(),
                    },
                    Part::InlineData {
                        inline_data: InlineData {
                            mime_type: mime_type.to_owned(),
                            data: image_base64.to_owned(),
                        },
                    },
                ],
            }],
            generation_config: GenerationConfig {
                response_modalities: vec!["image".to_string(), "text".to_string()],
                response_mime_type: "text/plain".to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn envelope_matches_provider_wire_format() {
        let req = GenerateContentRequest::image_edit("remove the background", "QUJD", "image/png");
        let value = serde_json::to_value(&req).expect("envelope serializes");

        assert_eq!(
            value,
            json!({
                "contents": [{
                    "parts": [
                        { "text": "remove the background" },
                        { "inline_data": { "mime_type": "image/png", "data": "QUJD" } }
                    ]
                }],
                "generationConfig": {
                    "responseModalities": ["image", "text"],
                    "responseMimeType": "text/plain"
                }
            })
        );
    }
}
