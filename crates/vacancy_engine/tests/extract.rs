use pretty_assertions::assert_eq;
use url::Url;
use vacancy_engine::{
    decode_page, ExtractError, ExtractorSettings, VacancyDetails, VacancyExtractor,
};

const LISTING: &str = r#"
<html><body>
  <div class="lc-jobs-vacancy-card">
    <a class="lc-jobs-vacancy-card__link" href="/jobs/vacancies/ml-1">ML 1</a>
  </div>
  <div class="lc-jobs-vacancy-card">
    <a class="lc-jobs-vacancy-card__link" href="/jobs/vacancies/ml-2?from=list">ML 2</a>
  </div>
  <a class="lc-jobs-vacancy-card__link">no href</a>
  <a class="other" href="/jobs/vacancies/not-a-card">ignored</a>
  <a class="lc-jobs-vacancy-card__link" href="https://yandex.ru/jobs/vacancies/ml-3">ML 3</a>
</body></html>
"#;

fn extractor() -> VacancyExtractor {
    VacancyExtractor::new(ExtractorSettings::default()).unwrap()
}

fn listing_base() -> Url {
    Url::parse("https://yandex.ru/jobs/vacancies?work_modes=remote&professions=ml-developer")
        .unwrap()
}

#[test]
fn listing_links_resolve_against_listing_url() {
    let links = extractor().listing_links(LISTING, &listing_base());
    assert_eq!(
        links,
        vec![
            "https://yandex.ru/jobs/vacancies/ml-1".to_string(),
            "https://yandex.ru/jobs/vacancies/ml-2?from=list".to_string(),
            "https://yandex.ru/jobs/vacancies/ml-3".to_string(),
        ]
    );
}

#[test]
fn listing_without_cards_is_empty() {
    let links = extractor().listing_links("<html><body><p>none</p></body></html>", &listing_base());
    assert!(links.is_empty());
}

#[test]
fn details_are_trimmed_text_of_first_matches() {
    let html = r#"
    <html><body>
      <h1>
        Senior ML Developer
      </h1>
      <h1>Second heading</h1>
      <div class="lc-jobs-tags-block">
        <span class="lc-jobs-tags-block__service-name"> Search <b>Quality</b> </span>
      </div>
    </body></html>
    "#;
    let details = extractor().vacancy_details(html).unwrap();
    assert_eq!(
        details,
        VacancyDetails {
            position: "Senior ML Developer".to_string(),
            service: "Search Quality".to_string(),
        }
    );
}

#[test]
fn missing_service_is_reported() {
    let err = extractor()
        .vacancy_details("<html><body><h1>Only title</h1></body></html>")
        .unwrap_err();
    assert_eq!(
        err,
        ExtractError::MissingElement {
            selector: ".lc-jobs-tags-block__service-name".to_string()
        }
    );
}

#[test]
fn invalid_selector_is_rejected_up_front() {
    let settings = ExtractorSettings {
        position: "h1[".to_string(),
        ..ExtractorSettings::default()
    };
    let err = VacancyExtractor::new(settings).unwrap_err();
    assert!(matches!(err, ExtractError::InvalidSelector { selector, .. } if selector == "h1["));
}

#[test]
fn decode_respects_charset_header() {
    let bytes = b"\xc2\xe0\xea\xe0\xed\xf1\xe8\xff"; // windows-1251
    let text = decode_page(bytes, Some("text/html; charset=windows-1251"));
    assert_eq!(text, "Вакансия");
}

#[test]
fn decode_prefers_utf8_bom() {
    let text = decode_page(b"\xEF\xBB\xBFhello", Some("text/html; charset=windows-1251"));
    assert_eq!(text, "hello");
}

#[test]
fn decode_then_extract_cyrillic_page() {
    let html = "<html><body><h1>Разработчик</h1><span class=\"lc-jobs-tags-block__service-name\">Поиск</span></body></html>";
    let text = decode_page(html.as_bytes(), None);
    let details = extractor().vacancy_details(&text).unwrap();
    assert_eq!(details.position, "Разработчик");
    assert_eq!(details.service, "Поиск");
}

#[test]
fn stray_bad_byte_does_not_lose_details() {
    let mut page = b"<html><body><h1>ML Engineer</h1><p>".to_vec();
    page.push(0xff);
    page.extend_from_slice(
        b"</p><div class=\"lc-jobs-tags-block__service-name\">Search</div></body></html>",
    );

    let text = decode_page(&page, Some("text/html; charset=utf-8"));
    assert!(text.contains('\u{FFFD}'));

    let details = extractor().vacancy_details(&text).unwrap();
    assert_eq!(details.position, "ML Engineer");
    assert_eq!(details.service, "Search");
}
