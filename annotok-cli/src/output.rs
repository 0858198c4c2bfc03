use annotok::{Position, TokenStream};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// One `position<TAB>text` line per token
    Text,
    /// A JSON array of `{position, text, kind}` objects
    Json,
}

#[derive(Debug, Serialize)]
struct TokenRecord<'a> {
    position: Position,
    text: &'a str,
    kind: &'a str,
}

pub fn render_text(stream: &TokenStream) -> String {
    stream
        .iter()
        .map(|(position, token)| format!("{}\t{}\n", position, token.text))
        .collect()
}

pub fn render_json(stream: &TokenStream) -> serde_json::Result<String> {
    let records: Vec<_> = stream
        .iter()
        .map(|(position, token)| TokenRecord {
            position: *position,
            text: &token.text,
            kind: &token.kind,
        })
        .collect();
    serde_json::to_string(&records)
}

pub fn render(stream: &TokenStream, format: OutputFormat) -> serde_json::Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(stream)),
        OutputFormat::Json => render_json(stream).map(|json| json + "\n"),
    }
}

#[cfg(test)]
mod tests {
    use annotok::{empty_stream, Token};

    use super::*;

    fn sample() -> TokenStream {
        let mut stream = empty_stream();
        stream.insert(Position::Offset(4), Token::new("x", "IDENTIFIER"));
        stream
    }

    #[test]
    fn test_render_text() {
        assert_eq!(
            render_text(&sample()),
            "^\t<SENTENCE_START>\n4\tx\n$\t<SENTENCE_END>\n"
        );
    }

    #[test]
    fn test_render_json() {
        let json: serde_json::Value = serde_json::from_str(&render_json(&sample()).unwrap()).unwrap();
        assert_eq!(json[0]["position"], "start");
        assert_eq!(json[1]["position"]["offset"], 4);
        assert_eq!(json[1]["text"], "x");
        assert_eq!(json[1]["kind"], "IDENTIFIER");
        assert_eq!(json[2]["kind"], "<SENTENCE_END>");
    }
}
