//! Shopping-assistant gateway.
//!
//! Each chat turn is a single provider call: a fixed instruction, a compact
//! rendering of the active catalog and the user's message. Provider failures
//! never reach the caller; `reply` degrades to [`FALLBACK_MESSAGE`] and
//! `recommend_products` to an empty list. No conversation memory is sent to
//! the provider; the stored history is for inspection only.

use serde_json::Value;

use crate::{
    ai::{GenerationRequest, ProviderError},
    dto::chat::{ChatReply, ChatRequest, RecommendationList, RecommendationRequest},
    error::{AppError, AppResult},
    models::{ChatMessage, Product},
    response::ApiResponse,
    state::AppState,
    store::NewChatMessage,
};

pub const FALLBACK_MESSAGE: &str = "I'm experiencing some technical difficulties right now. \
Please try again in a moment or contact our support team for assistance.";

const MAX_RECOMMENDATIONS: usize = 3;
const DESCRIPTION_PREVIEW_CHARS: usize = 100;
const RECOMMENDATION_KEYWORDS: [&str; 3] = ["recommend", "suggest", "consider"];
const BULLET_MARKERS: [char; 3] = ['-', '*', '•'];

const ASSISTANT_INSTRUCTION: &str = "You are the shopping assistant of DevToolHub, a site that \
curates tools, courses and services for fullstack developers. Help visitors pick products that \
fit their project, skill level and budget. Prefer products from the catalog below and mention \
them by name, compare options honestly, keep answers practical and concise, and be transparent \
that links are affiliate links.";

const RECOMMENDER_INSTRUCTION: &str = "You are a product recommendation engine. Pick the catalog \
products that best match the user's query. Respond with a JSON object of the form \
{\"recommendations\": [\"<product name>\", ...]} using product names exactly as listed.";

/// `<name> - <category> - $<price> - <description preview>`
pub fn context_line(product: &Product) -> String {
    let mut preview: String = product
        .description
        .chars()
        .take(DESCRIPTION_PREVIEW_CHARS)
        .collect();
    if product.description.chars().count() > DESCRIPTION_PREVIEW_CHARS {
        preview.push_str("...");
    }
    format!(
        "{} - {} - ${} - {}",
        product.name, product.category, product.price, preview
    )
}

pub fn build_catalog_context(products: &[Product]) -> String {
    products
        .iter()
        .map(context_line)
        .collect::<Vec<_>>()
        .join("\n")
}

fn assistant_system_prompt(context: &str) -> String {
    let catalog = if context.is_empty() {
        "(no products are currently listed)"
    } else {
        context
    };
    format!("{ASSISTANT_INSTRUCTION}\n\nCurrent catalog:\n{catalog}")
}

/// Best-effort scan of a free-text reply for recommendation sentences.
///
/// A line qualifies when it contains one of the lowercase recommendation
/// keywords (matched case-sensitively) and, once trimmed and stripped of a leading bullet, is longer than 10 and
/// shorter than 100 characters. At most three lines are returned.
pub fn extract_recommendations(reply: &str) -> Vec<String> {
    reply
        .lines()
        .filter(|line| RECOMMENDATION_KEYWORDS.iter().any(|kw| line.contains(kw)))
        .map(strip_bullet)
        .filter(|line| {
            let len = line.chars().count();
            len > 10 && len < 100
        })
        .map(str::to_string)
        .take(MAX_RECOMMENDATIONS)
        .collect()
}

fn strip_bullet(line: &str) -> &str {
    let line = line.trim();
    match line.strip_prefix(BULLET_MARKERS) {
        Some(rest) => rest.trim_start(),
        None => line,
    }
}

/// Reads the provider's JSON answer: either `{"recommendations": [...]}` or a
/// bare array. Entries may be strings or objects with a `name` field.
fn parse_recommendation_names(raw: &str) -> Option<Vec<String>> {
    let value: Value = serde_json::from_str(raw.trim()).ok()?;
    let entries = match value {
        Value::Array(entries) => entries,
        Value::Object(mut map) => match map.remove("recommendations") {
            Some(Value::Array(entries)) => entries,
            _ => return None,
        },
        _ => return None,
    };
    Some(
        entries
            .into_iter()
            .filter_map(|entry| match entry {
                Value::String(name) => Some(name),
                Value::Object(mut obj) => match obj.remove("name") {
                    Some(Value::String(name)) => Some(name),
                    _ => None,
                },
                _ => None,
            })
            .collect(),
    )
}

/// Keeps names that match an active product, in the catalog's spelling.
fn match_catalog_names(names: Vec<String>, products: &[Product]) -> Vec<String> {
    let mut matched: Vec<String> = Vec::new();
    for name in names {
        let wanted = name.trim();
        if let Some(product) = products
            .iter()
            .find(|p| p.name.trim().eq_ignore_ascii_case(wanted))
        {
            if !matched.contains(&product.name) {
                matched.push(product.name.clone());
            }
        }
    }
    matched
}

async fn call_provider(state: &AppState, request: GenerationRequest) -> Result<String, ProviderError> {
    match tokio::time::timeout(state.provider_timeout, state.provider.generate(request)).await {
        Ok(result) => result,
        Err(_) => Err(ProviderError::Timeout),
    }
}

pub async fn reply(state: &AppState, payload: ChatRequest) -> AppResult<ApiResponse<ChatReply>> {
    let ChatRequest {
        message,
        session_id,
    } = payload.checked()?;

    let products = state.store.list_active_products().await?;
    let request = GenerationRequest {
        system: assistant_system_prompt(&build_catalog_context(&products)),
        user: message.clone(),
        max_tokens: 500,
        temperature: Some(0.7),
        json_output: false,
    };

    let reply = match call_provider(state, request).await {
        Ok(text) => {
            let recommendations = extract_recommendations(&text);
            let record = NewChatMessage {
                session_id: session_id.clone(),
                message,
                response: text.clone(),
            };
            if let Err(err) = state.store.insert_chat_message(record).await {
                tracing::warn!(error = %err, session_id = %session_id, "chat log write failed");
            }
            ChatReply {
                message: text,
                recommendations,
            }
        }
        Err(err) => {
            tracing::warn!(error = %err, session_id = %session_id, "assistant provider failed, sending fallback reply");
            ChatReply {
                message: FALLBACK_MESSAGE.to_string(),
                recommendations: Vec::new(),
            }
        }
    };

    Ok(ApiResponse::success("Chat reply", reply, None))
}

pub async fn recommend_products(
    state: &AppState,
    payload: RecommendationRequest,
) -> AppResult<ApiResponse<RecommendationList>> {
    let query = payload.query.trim();
    if query.is_empty() {
        return Err(AppError::InvalidInput("Query is required".into()));
    }

    let products = state.store.list_active_products().await?;
    if products.is_empty() {
        return Ok(ApiResponse::success(
            "Recommendations",
            RecommendationList {
                recommendations: Vec::new(),
            },
            None,
        ));
    }

    let catalog = products
        .iter()
        .map(|p| format!("{} - {} - ${}", p.name, p.category, p.price))
        .collect::<Vec<_>>()
        .join("\n");
    let request = GenerationRequest {
        system: RECOMMENDER_INSTRUCTION.to_string(),
        user: format!(
            "User query: {query}\n\nAvailable products:\n{catalog}\n\nRecommend the best matching products:"
        ),
        max_tokens: 200,
        temperature: None,
        json_output: true,
    };

    let names = match call_provider(state, request).await {
        Ok(raw) => parse_recommendation_names(&raw).unwrap_or_else(|| {
            tracing::warn!("recommendation response was not the expected JSON");
            Vec::new()
        }),
        Err(err) => {
            tracing::warn!(error = %err, "recommendation provider call failed");
            Vec::new()
        }
    };

    Ok(ApiResponse::success(
        "Recommendations",
        RecommendationList {
            recommendations: match_catalog_names(names, &products),
        },
        None,
    ))
}

/// Stored turns of one session, oldest first.
pub async fn get_history(
    state: &AppState,
    session_id: &str,
) -> AppResult<ApiResponse<Vec<ChatMessage>>> {
    if session_id.trim().is_empty() {
        return Err(AppError::InvalidInput("sessionId is required".into()));
    }
    let items = state.store.list_chat_messages(session_id).await?;
    Ok(ApiResponse::list("Chat history", items))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn product(name: &str, description: &str) -> Product {
        Product {
            id: 1,
            name: name.to_string(),
            description: description.to_string(),
            category: "Laptops".to_string(),
            price: "1299.00".parse().unwrap(),
            original_price: None,
            discount: 0,
            rating: "4.5".parse().unwrap(),
            image_url: "https://example.com/a.png".to_string(),
            affiliate_url: "https://example.com/a".to_string(),
            is_active: true,
            is_featured: false,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn extracts_a_qualifying_line() {
        let reply = "Hello there!\nI would recommend the Gaming Laptop Pro for this budget\nThanks.";
        assert_eq!(
            extract_recommendations(reply),
            vec!["I would recommend the Gaming Laptop Pro for this budget".to_string()]
        );
    }

    #[test]
    fn strips_bullets_and_caps_at_three() {
        let reply = "- I recommend the Ferris Mug for coffee\n\
                     * You might consider the Axum Hoodie\n\
                     • I suggest the Sticker Pack as a gift\n\
                     - Also consider the Async Rust e-book";
        let recs = extract_recommendations(reply);
        assert_eq!(recs.len(), 3);
        assert_eq!(recs[0], "I recommend the Ferris Mug for coffee");
        assert_eq!(recs[1], "You might consider the Axum Hoodie");
        assert_eq!(recs[2], "I suggest the Sticker Pack as a gift");
    }

    #[test]
    fn rejects_lines_outside_length_window() {
        let long = format!("I recommend {}", "x".repeat(100));
        let reply = format!("- suggest it\n{long}\nNothing to see here at all, no keywords");
        assert!(extract_recommendations(&reply).is_empty());
    }

    #[test]
    fn keyword_match_is_case_sensitive() {
        let reply = "Recommended: the MongoDB Atlas Pro Plan\nConsider the Axum Hoodie for winter";
        assert!(extract_recommendations(reply).is_empty());

        let recs = extract_recommendations("Staff recommended: the MongoDB Atlas Pro Plan");
        assert_eq!(recs, vec!["Staff recommended: the MongoDB Atlas Pro Plan".to_string()]);
    }

    #[test]
    fn context_line_truncates_long_descriptions() {
        let p = product("Gaming Laptop Pro", &"a".repeat(150));
        let line = context_line(&p);
        assert!(line.starts_with("Gaming Laptop Pro - Laptops - $1299.00 - "));
        assert!(line.ends_with(&format!("{}...", "a".repeat(100))));

        let short = product("Mouse", "Small and quick");
        assert_eq!(context_line(&short), "Mouse - Laptops - $1299.00 - Small and quick");
    }

    #[test]
    fn parses_recommendation_json_shapes() {
        assert_eq!(
            parse_recommendation_names(r#"{"recommendations": ["A", "B"]}"#),
            Some(vec!["A".to_string(), "B".to_string()])
        );
        assert_eq!(
            parse_recommendation_names(r#"[{"name": "A"}, "B", 3]"#),
            Some(vec!["A".to_string(), "B".to_string()])
        );
        assert_eq!(parse_recommendation_names("not json"), None);
        assert_eq!(parse_recommendation_names(r#"{"other": []}"#), None);
    }

    #[test]
    fn catalog_matching_uses_catalog_spelling() {
        let products = vec![product("Gaming Laptop Pro", "x"), product("Mouse", "y")];
        let names = vec![
            "gaming laptop pro".to_string(),
            "Unknown Thing".to_string(),
            "MOUSE".to_string(),
            "Mouse".to_string(),
        ];
        assert_eq!(
            match_catalog_names(names, &products),
            vec!["Gaming Laptop Pro".to_string(), "Mouse".to_string()]
        );
    }
}
