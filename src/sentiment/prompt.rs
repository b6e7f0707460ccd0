use serde::Serialize;

pub const SYSTEM_PROMPT: &str = "You are a DATA ANALYST capable of sentiment analysis from a list of reviews that responds in only JSON format. \
The reviews are given as a JSON array of objects with an \"index\" and a \"review\" field. \
Make sure to stick to JSON and output a valid JSON object and provide a response for every review in the list. \
The JSON schema is as follows: {\"<index>(in double quotes)\": {\"POSITIVE\": numeric(0-1), \"NEGATIVE\": numeric(0-1), \"NEUTRAL\": numeric(0-1)}}";

#[derive(Serialize)]
struct IndexedReview<'a> {
    index: usize,
    review: &'a str,
}

/// Render reviews as a JSON array so quotes and delimiters in the text stay escaped.
pub fn render_reviews(reviews: &[String]) -> serde_json::Result<String> {
    let items: Vec<IndexedReview<'_>> = reviews
        .iter()
        .enumerate()
        .map(|(index, review)| IndexedReview { index, review })
        .collect();

    serde_json::to_string(&items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    #[test]
    fn renders_indexed_array() {
        let rendered = render_reviews(&["good".to_string(), "bad".to_string()]).unwrap();
        assert_eq!(
            rendered,
            r#"[{"index":0,"review":"good"},{"index":1,"review":"bad"}]"#
        );
    }

    #[test]
    fn escapes_quotes_and_delimiters() {
        let tricky = vec![
            "it's 'fine', I guess".to_string(),
            "he said \"no\"\nthen left".to_string(),
        ];
        let parsed: Value = serde_json::from_str(&render_reviews(&tricky).unwrap()).unwrap();
        assert_eq!(
            parsed,
            json!([
                {"index": 0, "review": "it's 'fine', I guess"},
                {"index": 1, "review": "he said \"no\"\nthen left"}
            ])
        );
    }

    #[test]
    fn empty_list_is_empty_array() {
        assert_eq!(render_reviews(&[]).unwrap(), "[]");
    }
}
