//! Turn-by-turn field extraction.
//!
//! Delegates to the text understanding collaborator with a structured
//! JSON contract, parses the response defensively, and falls back to
//! deterministic pattern extraction when parsing fails or the
//! collaborator is down.

use serde_json::Value;
use tracing::{debug, warn};

use crate::domain::case::{
    CaseRecord, ComplaintCategory, Emotion, EmotionIntensity, EmotionObservation, FieldUpdate,
    FieldUpdateSource, UrgencyLevel,
};
use crate::domain::dialogue::Slot;
use crate::ports::{TextUnderstanding, NO_SPEECH_SENTINEL};

use super::PatternExtractor;

/// Everything the extractor needs to process one turn.
#[derive(Debug, Clone, Copy)]
pub struct ExtractionRequest<'a> {
    /// The transcribed or typed utterance.
    pub raw_text: &'a str,
    /// Snapshot of the case so far, for the prompt's context block.
    pub record: &'a CaseRecord,
    /// The question this utterance answers.
    pub question: &'a str,
    /// The slot the question targeted; drives the fallback patterns.
    pub targeted_slot: Slot,
}

/// Extracts a partial case update from one utterance.
///
/// Pure with respect to the case record: the caller performs the merge.
#[derive(Debug, Clone, Default)]
pub struct TurnExtractor {
    patterns: PatternExtractor,
}

impl TurnExtractor {
    /// Creates an extractor.
    pub fn new() -> Self {
        Self {
            patterns: PatternExtractor::new(),
        }
    }

    /// Extracts a field update for one turn.
    ///
    /// Never errors: collaborator failure and unparsable output both fall
    /// back to pattern extraction, and an empty utterance yields the
    /// `Failed` sentinel update.
    pub async fn extract(
        &self,
        understanding: &dyn TextUnderstanding,
        request: &ExtractionRequest<'_>,
    ) -> FieldUpdate {
        let raw = request.raw_text.trim();
        if raw.is_empty() || raw == NO_SPEECH_SENTINEL {
            return FieldUpdate::failed();
        }

        let prompt = build_extraction_prompt(request);
        match self.request_structured(understanding, &prompt).await {
            Some(response) => match parse_structured_response(&response) {
                Some(update) => {
                    debug!("structured extraction parsed");
                    update
                }
                None => {
                    warn!("unparsable extraction response, using pattern fallback");
                    self.patterns.extract_for_slot(request.targeted_slot, raw)
                }
            },
            None => self.patterns.extract_for_slot(request.targeted_slot, raw),
        }
    }

    /// Calls the collaborator with one bounded retry on failure.
    async fn request_structured(
        &self,
        understanding: &dyn TextUnderstanding,
        prompt: &str,
    ) -> Option<String> {
        for attempt in 0..2 {
            match understanding.extract(prompt).await {
                Ok(response) => return Some(response),
                Err(err) => {
                    warn!(attempt, error = %err, "understanding collaborator failed");
                }
            }
        }
        None
    }
}

/// Builds the structured-extraction prompt for one turn.
fn build_extraction_prompt(request: &ExtractionRequest<'_>) -> String {
    let record = request.record;
    let known = |v: &Option<String>| v.clone().unwrap_or_else(|| "Unknown".to_string());

    format!(
        "You are an expert at extracting customer information from conversations.\n\
         \n\
         PREVIOUS QUESTION ASKED: {question}\n\
         CUSTOMER RESPONSE: {response}\n\
         \n\
         CURRENT CUSTOMER DATA:\n\
         - Name: {name}\n\
         - Phone: {phone}\n\
         - Email: {email}\n\
         - Problem: {problem}\n\
         - Order ID: {order}\n\
         - Product: {product}\n\
         - Company: {company}\n\
         \n\
         Extract any new information from the customer's response. Only include fields that \
         can be clearly identified; use null for unclear or missing values.\n\
         \n\
         Respond with ONLY a valid JSON object in this exact format:\n\
         {{\n\
           \"customer_name\": \"extracted name or null\",\n\
           \"customer_phone\": \"extracted phone or null\",\n\
           \"customer_email\": \"extracted email or null\",\n\
           \"customer_address\": \"extracted address or null\",\n\
           \"problem_description\": \"extracted problem description or null\",\n\
           \"problem_category\": \"delivery/product_quality/payment/refund/customer_service/account_issues/content_moderation/other or null\",\n\
           \"urgency_level\": \"low/medium/high/critical or null\",\n\
           \"order_id\": \"extracted order id or null\",\n\
           \"product_name\": \"extracted product name or null\",\n\
           \"purchase_date\": \"extracted date or null\",\n\
           \"company_name\": \"company mentioned or null\",\n\
           \"company_confidence\": 0.0,\n\
           \"customer_emotion\": \"calm/frustrated/angry/disappointed/worried/satisfied/confused/neutral or null\",\n\
           \"emotion_intensity\": \"low/medium/high or null\",\n\
           \"emotion_keywords\": [\"emotional words found in the response\"]\n\
         }}",
        question = request.question,
        response = request.raw_text,
        name = known(&record.customer_name),
        phone = known(&record.customer_phone),
        email = known(&record.customer_email),
        problem = known(&record.description),
        order = known(&record.order_id),
        product = known(&record.product_name),
        company = known(&record.company_name),
    )
}

/// Defensively parses the collaborator's response into a field update.
///
/// Strips code-fence markers, tries a direct parse, then scans for the
/// first balanced `{...}` substring. Returns None when no JSON object can
/// be recovered.
fn parse_structured_response(response: &str) -> Option<FieldUpdate> {
    let stripped = strip_code_fences(response);
    let value = match serde_json::from_str::<Value>(stripped.trim()) {
        Ok(value) => value,
        Err(_) => {
            let candidate = find_balanced_object(stripped.trim())?;
            serde_json::from_str(&candidate).ok()?
        }
    };
    let object = value.as_object()?;

    let mut update = FieldUpdate::empty(FieldUpdateSource::Parsed);
    update.customer_name = string_field(object.get("customer_name"));
    update.customer_phone = string_field(object.get("customer_phone"));
    update.customer_email = string_field(object.get("customer_email"));
    update.customer_address = string_field(object.get("customer_address"));
    update.description = string_field(object.get("problem_description"));
    update.category = string_field(object.get("problem_category"))
        .and_then(|s| ComplaintCategory::parse_lenient(&s));
    update.urgency =
        string_field(object.get("urgency_level")).and_then(|s| UrgencyLevel::parse_lenient(&s));
    update.order_id = string_field(object.get("order_id"));
    update.product_name = string_field(object.get("product_name"));
    update.purchase_date = string_field(object.get("purchase_date"));
    update.company_name = string_field(object.get("company_name"));
    update.company_confidence = object
        .get("company_confidence")
        .and_then(Value::as_f64)
        .unwrap_or(0.0)
        .clamp(0.0, 1.0);
    update.emotion = parse_emotion(object);

    Some(update)
}

/// Removes markdown code-fence wrapping, if present.
fn strip_code_fences(response: &str) -> &str {
    let trimmed = response.trim();
    let without_open = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .unwrap_or(trimmed);
    without_open
        .trim()
        .strip_suffix("```")
        .unwrap_or(without_open)
        .trim()
}

/// Finds the first balanced `{...}` substring, string- and escape-aware.
fn find_balanced_object(s: &str) -> Option<String> {
    let start = s.find('{')?;
    let mut depth = 0i32;
    let mut in_string = false;
    let mut escape_next = false;

    for (offset, c) in s[start..].char_indices() {
        if escape_next {
            escape_next = false;
            continue;
        }
        match c {
            '\\' if in_string => escape_next = true,
            '"' => in_string = !in_string,
            _ if in_string => {}
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(s[start..start + offset + c.len_utf8()].to_string());
                }
            }
            _ => {}
        }
    }
    None
}

/// Reads a string field, filtering the sentinel junk collaborators emit
/// for absent values.
fn string_field(value: Option<&Value>) -> Option<String> {
    let s = value?.as_str()?.trim();
    if s.is_empty() {
        return None;
    }
    match s.to_lowercase().as_str() {
        "null" | "none" | "unknown" | "n/a" => None,
        _ => Some(s.to_string()),
    }
}

fn parse_emotion(object: &serde_json::Map<String, Value>) -> Option<EmotionObservation> {
    let emotion =
        string_field(object.get("customer_emotion")).and_then(|s| Emotion::parse_lenient(&s))?;
    let intensity = string_field(object.get("emotion_intensity"))
        .and_then(|s| EmotionIntensity::parse_lenient(&s))
        .unwrap_or_default();
    let keywords = object
        .get("emotion_keywords")
        .and_then(Value::as_array)
        .map(|arr| {
            arr.iter()
                .filter_map(|v| v.as_str())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();
    Some(EmotionObservation::new(emotion, intensity, keywords))
}
