use crate::types::FrequencyTable;

/// Percent-encodes every key of a frequency table for transport through a
/// URL query string.
///
/// The encoding is injective, so two distinct raw keys can never collapse
/// into the same transported key, regardless of what quotes, percent signs
/// or multibyte characters they contain. [`unescape_after_transport`]
/// reverses it exactly.
pub fn escape_for_transport(table: &FrequencyTable) -> FrequencyTable {
    table
        .iter()
        .map(|(key, count)| (urlencoding::encode(key).into_owned(), *count))
        .collect()
}

/// Decodes keys previously escaped with [`escape_for_transport`], restoring
/// the original display strings.
///
/// A key that fails to decode (not produced by the escape side) is kept
/// verbatim rather than dropped.
pub fn unescape_after_transport(table: &FrequencyTable) -> FrequencyTable {
    table
        .iter()
        .map(|(key, count)| {
            let decoded = urlencoding::decode(key)
                .map(|cow| cow.into_owned())
                .unwrap_or_else(|_| key.clone());
            (decoded, *count)
        })
        .collect()
}
