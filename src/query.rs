use url::Url;

/// A one-time query parameter taken out of a url.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsumedParam {
    pub value: String,

    /// Path-relative url without the consumed parameter, ready for a history replacement.
    /// Carries a query string only when other parameters remain.
    pub cleaned: String,
}

/// Take the first occurrence of `name` out of `url`'s query. All occurrences are removed from
/// the cleaned url. `None` when the parameter is not present.
pub fn take_query_param(url: &Url, name: &str) -> Option<ConsumedParam> {
    let value = url
        .query_pairs()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())?;

    let remaining = url
        .query_pairs()
        .filter(|(key, _)| key != name)
        .collect::<Vec<_>>();

    let cleaned = match remaining.is_empty() {
        true => url.path().to_owned(),
        false => {
            let query = url::form_urlencoded::Serializer::new(String::new())
                .extend_pairs(remaining)
                .finish();
            format!("{}?{query}", url.path())
        }
    };

    Some(ConsumedParam { value, cleaned })
}
