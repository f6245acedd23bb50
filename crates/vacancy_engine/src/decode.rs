use chardetng::EncodingDetector;
use encoding_rs::Encoding;
use vacancy_logging::vacancy_warn;

/// Decode a fetched page to UTF-8.
///
/// Order of precedence: byte order mark, `charset=` in the Content-Type
/// header, then chardetng's guess over the whole body. Malformed sequences
/// become U+FFFD so the rest of the page stays usable.
pub fn decode_page(bytes: &[u8], content_type: Option<&str>) -> String {
    let encoding = Encoding::for_bom(bytes)
        .map(|(encoding, _)| encoding)
        .or_else(|| content_type.and_then(header_charset))
        .unwrap_or_else(|| {
            let mut detector = EncodingDetector::new();
            detector.feed(bytes, true);
            detector.guess(None, true)
        });

    let (text, _, had_errors) = encoding.decode(bytes);
    if had_errors {
        vacancy_warn!("Page is not clean {}, replaced bad bytes", encoding.name());
    }
    text.into_owned()
}

fn header_charset(content_type: &str) -> Option<&'static Encoding> {
    content_type.split(';').skip(1).find_map(|param| {
        let (key, value) = param.split_once('=')?;
        if !key.trim().eq_ignore_ascii_case("charset") {
            return None;
        }
        Encoding::for_label(value.trim().trim_matches(&['"', '\''][..]).as_bytes())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn charset_parameter_is_case_insensitive() {
        let enc = header_charset("text/html; Charset=\"windows-1251\"").unwrap();
        assert_eq!(enc.name(), "windows-1251");
        assert!(header_charset("text/html").is_none());
    }
}
