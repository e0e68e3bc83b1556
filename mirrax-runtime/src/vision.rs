use serde_derive::{Deserialize, Serialize};

use crate::core::DetectedComponent;

/// Instruction sent with every analysis request.
const ANALYSIS_INSTRUCTION: &str = "Identify the main hardware components in this PC/server build. Focus on the GPU (brand, model if visible), CPU cooler type, and power supply. Return a JSON structure with detected items.";

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct VisionConfig {
    /// Analysis service endpoint.
    #[serde(default = "VisionConfig::default_endpoint")]
    pub endpoint: String,
    /// Generative model identifier.
    #[serde(default = "VisionConfig::default_model")]
    pub model: String,
    /// API key for the analysis service.
    pub api_key: String,
    /// Request timeout in milliseconds.
    #[serde(default = "VisionConfig::default_timeout")]
    pub timeout: u64,
}

impl VisionConfig {
    /// Construct a configuration with the default endpoint, model and timeout.
    pub fn new(api_key: impl ToString) -> Self {
        Self {
            endpoint: Self::default_endpoint(),
            model: Self::default_model(),
            api_key: api_key.to_string(),
            timeout: Self::default_timeout(),
        }
    }

    fn default_endpoint() -> String {
        "https://generativelanguage.googleapis.com".to_owned()
    }

    fn default_model() -> String {
        "gemini-3-flash-preview".to_owned()
    }

    fn default_timeout() -> u64 {
        5_000
    }
}

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    #[serde(rename = "inlineData", skip_serializing_if = "Option::is_none")]
    inline_data: Option<InlineData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Serialize)]
struct InlineData {
    #[serde(rename = "mimeType")]
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    #[serde(rename = "responseMimeType")]
    response_mime_type: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
struct Detections {
    #[serde(default)]
    components: Vec<DetectedComponent>,
}

/// Client for the generative image analysis service.
///
/// The client never surfaces a fault to its caller. Every failure mode,
/// transport, status, or payload, is logged and collapses to no result.
#[derive(Clone)]
pub struct VisionClient {
    config: VisionConfig,
    client: reqwest::Client,
}

impl VisionClient {
    /// Construct a client from the vision configuration.
    pub fn new(config: &VisionConfig) -> crate::runtime::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(format!("mirrax/{}", crate::consts::VERSION))
            .timeout(std::time::Duration::from_millis(config.timeout))
            .build()
            .map_err(crate::runtime::Error::Vision)?;

        Ok(Self {
            config: config.clone(),
            client,
        })
    }

    /// Analyze a base64 encoded JPEG photograph.
    pub async fn analyze(&self, image: &str) -> Option<Vec<DetectedComponent>> {
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![
                    Part {
                        inline_data: Some(InlineData {
                            mime_type: "image/jpeg".to_owned(),
                            data: image.to_owned(),
                        }),
                        text: None,
                    },
                    Part {
                        inline_data: None,
                        text: Some(ANALYSIS_INSTRUCTION.to_owned()),
                    },
                ],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_owned(),
            },
        };

        let request_url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.config.endpoint.trim_end_matches('/'),
            self.config.model,
            self.config.api_key
        );

        log::debug!("Requesting analysis from model {}", self.config.model);

        let response = match self.client.post(&request_url).json(&request).send().await {
            Ok(response) => response,
            Err(e) => {
                log::error!("Analysis request failed: {}", e);
                return None;
            }
        };

        if !response.status().is_success() {
            log::error!("Analysis failed, status: {}", response.status());
            return None;
        }

        match response.json::<GenerateResponse>().await {
            Ok(response) => parse_detections(&response),
            Err(e) => {
                log::error!("Malformed analysis response: {}", e);
                None
            }
        }
    }

    /// Analyze a raw JPEG photograph.
    pub async fn analyze_jpeg(&self, image: &[u8]) -> Option<Vec<DetectedComponent>> {
        self.analyze(&base64_encode(image)).await
    }
}

/// Extract the component list from the first candidate payload.
fn parse_detections(response: &GenerateResponse) -> Option<Vec<DetectedComponent>> {
    let text = response
        .candidates
        .first()?
        .content
        .as_ref()?
        .parts
        .first()?
        .text
        .trim();

    match serde_json::from_str::<Detections>(text) {
        Ok(detections) => Some(detections.components),
        Err(e) => {
            log::error!("Malformed analysis payload: {}", e);
            None
        }
    }
}

fn base64_encode(data: &[u8]) -> String {
    const TABLE: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

    let mut encoded = String::with_capacity(data.len().div_ceil(3) * 4);

    for chunk in data.chunks(3) {
        let triple = (chunk[0] as u32) << 16
            | (chunk.get(1).copied().unwrap_or(0) as u32) << 8
            | chunk.get(2).copied().unwrap_or(0) as u32;

        encoded.push(TABLE[((triple >> 18) & 0x3F) as usize] as char);
        encoded.push(TABLE[((triple >> 12) & 0x3F) as usize] as char);
        encoded.push(if chunk.len() > 1 {
            TABLE[((triple >> 6) & 0x3F) as usize] as char
        } else {
            '='
        });
        encoded.push(if chunk.len() > 2 {
            TABLE[(triple & 0x3F) as usize] as char
        } else {
            '='
        });
    }

    encoded
}
