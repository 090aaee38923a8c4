//! Text rendering of tool responses

use anyhow::Result;
use serde_json::Value;
use ticker_tools::registry::ToolDefinition;

/// Render a tool response for the terminal
pub fn response(value: &Value, as_json: bool) -> Result<String> {
    if as_json {
        return Ok(serde_json::to_string_pretty(value)?);
    }

    if let Some(message) = value.get("error_message").and_then(Value::as_str) {
        return Ok(format!("❌ Error: {message}"));
    }

    if let Some(analysis) = value.get("analysis").and_then(Value::as_str) {
        return Ok(analysis.trim_end().to_string());
    }

    if let Some(articles) = value.get("articles").and_then(Value::as_array) {
        return Ok(news(value, articles));
    }

    if let Some(confidence) = value.get("confidence").and_then(Value::as_str) {
        return Ok(format!(
            "{} ({}, confidence: {confidence})",
            text(value, "ticker"),
            text(value, "company")
        ));
    }

    if value.get("trend").is_some() {
        return Ok(format!(
            "{ticker} {timeframe}: {from} -> {to} ({change}, {percent}%) trend {trend}\n{comparison_date} -> {current_date}",
            ticker = text(value, "ticker"),
            timeframe = text(value, "timeframe"),
            from = text(value, "comparison_price"),
            to = text(value, "current_price"),
            change = text(value, "price_change"),
            percent = text(value, "percent_change"),
            trend = text(value, "trend").to_uppercase(),
            comparison_date = text(value, "comparison_date"),
            current_date = text(value, "current_date"),
        ));
    }

    if value.get("previous_close").is_some() {
        return Ok(format!(
            "{ticker}: ${price} (change {change}, {percent}) as of {updated}",
            ticker = text(value, "ticker"),
            price = text(value, "current_price"),
            change = text(value, "change"),
            percent = text(value, "change_percent"),
            updated = text(value, "last_updated"),
        ));
    }

    Ok(serde_json::to_string_pretty(value)?)
}

fn news(value: &Value, articles: &[Value]) -> String {
    let mut out = format!("Recent news for {}:\n", text(value, "ticker"));
    for (i, article) in articles.iter().enumerate() {
        out.push_str(&format!(
            "{}. {} [{}] ({}, {})\n   {}\n",
            i + 1,
            text(article, "title"),
            text(article, "sentiment"),
            text(article, "source"),
            text(article, "time_published"),
            text(article, "summary"),
        ));
    }
    out.trim_end().to_string()
}

/// Strings without quotes, anything else as JSON
fn text(value: &Value, key: &str) -> String {
    match value.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => "-".to_string(),
    }
}

/// Render the registered tools
pub fn tool_list(definitions: &[ToolDefinition], as_json: bool) -> Result<String> {
    if as_json {
        return Ok(serde_json::to_string_pretty(definitions)?);
    }

    Ok(definitions
        .iter()
        .map(|d| format!("{:<22} {}", d.name, d.description))
        .collect::<Vec<_>>()
        .join("\n"))
}
