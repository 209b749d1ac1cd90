use anyhow::{bail, Result};

const SEARCH_URL_TEMPLATE: &str = "https://www.amazon.com/s?k=";

/// Resolve the final search URL from the CLI arguments. An explicit URL
/// always wins over free text; free text is joined with `+` and
/// percent-encoded into the search template.
pub fn resolve_search_url(search_url: Option<&str>, search_text: Option<&str>) -> Result<String> {
    match (search_url, search_text) {
        (Some(url), Some(_)) => {
            println!("Both --search-url and --search-text provided. Using --search-url.");
            Ok(url.to_string())
        }
        (Some(url), None) => Ok(url.to_string()),
        (None, Some(text)) => Ok(format!("{}{}", SEARCH_URL_TEMPLATE, encode_query(text))),
        (None, None) => bail!("either --search-url or --search-text must be provided"),
    }
}

fn encode_query(text: &str) -> String {
    let words: Vec<_> = text.split(' ').map(urlencoding::encode).collect();
    words.join("+")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn free_text_is_encoded_into_the_template() {
        let url = resolve_search_url(None, Some("rtx 5070")).unwrap();
        assert_eq!(url, "https://www.amazon.com/s?k=rtx+5070");
    }

    #[test]
    fn free_text_with_reserved_characters_is_percent_encoded() {
        let url = resolve_search_url(None, Some("usb c & hdmi")).unwrap();
        assert_eq!(url, "https://www.amazon.com/s?k=usb+c+%26+hdmi");
    }

    #[test]
    fn explicit_url_wins_over_free_text() {
        let url = resolve_search_url(
            Some("https://www.amazon.com/s?k=ssd"),
            Some("something else"),
        )
        .unwrap();
        assert_eq!(url, "https://www.amazon.com/s?k=ssd");
    }

    #[test]
    fn explicit_url_is_passed_through_unchanged() {
        let url = resolve_search_url(Some("https://www.amazon.com/s?k=rtx+5070"), None).unwrap();
        assert_eq!(url, "https://www.amazon.com/s?k=rtx+5070");
    }

    #[test]
    fn missing_both_inputs_is_an_error() {
        assert!(resolve_search_url(None, None).is_err());
    }
}
