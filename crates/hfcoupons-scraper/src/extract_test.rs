use super::*;

const BASE: &str = "https://go.harborfreight.com";

fn page(body: &str) -> Html {
    Html::parse_document(&format!("<html><body>{body}</body></html>"))
}

fn with_first_article<T>(body: &str, f: impl FnOnce(ElementRef<'_>) -> T) -> T {
    let document = page(body);
    let article = document
        .select(&ARTICLE_SELECTOR)
        .next()
        .expect("fixture has an article");
    f(article)
}

fn coupon_article(name: &str, price: &str, code: &str) -> String {
    format!(
        r#"<article class="coupon">
             <h2 class="entry-title"><a href="/coupons/{code}/">{name}</a></h2>
             <img src="https://images.harborfreight.com/hftweb/coupons/{code}.png" alt="">
             <p>{price}</p>
             <p>Code: {code}</p>
             <p>Exp. 12/31/25</p>
           </article>"#
    )
}

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

// -----------------------------------------------------------------------
// looks_like_coupon
// -----------------------------------------------------------------------

#[test]
fn looks_like_coupon_requires_both_markers() {
    assert!(looks_like_coupon("Code 123 Exp 1/1/25"));
    assert!(!looks_like_coupon("Code 123 only"));
    assert!(!looks_like_coupon("Exp 1/1/25 only"));
}

#[test]
fn looks_like_coupon_is_case_sensitive() {
    assert!(!looks_like_coupon("code 123 exp 1/1/25"));
    assert!(!looks_like_coupon("CODE 123 EXP 1/1/25"));
}

// -----------------------------------------------------------------------
// extract_price
// -----------------------------------------------------------------------

#[test]
fn price_with_thousands_separator() {
    assert_eq!(extract_price("Now only $1,299.99!"), Some(dec("1299.99")));
}

#[test]
fn price_whole_dollars() {
    assert_eq!(extract_price("$49"), Some(dec("49")));
}

#[test]
fn price_first_match_wins() {
    assert_eq!(extract_price("$19.99 compare at $39.99"), Some(dec("19.99")));
}

#[test]
fn price_trailing_period_is_ignored() {
    assert_eq!(extract_price("Only $5. Limit one."), Some(dec("5")));
}

#[test]
fn price_missing() {
    assert_eq!(extract_price("Code 12345 Exp 1/1/25"), None);
}

#[test]
fn price_unparseable_first_match_is_absent() {
    assert_eq!(extract_price("$, then $10"), None);
}

#[test]
fn price_zero_is_absent() {
    assert_eq!(extract_price("FREE $0.00 with purchase"), None);
}

// -----------------------------------------------------------------------
// extract_code
// -----------------------------------------------------------------------

#[test]
fn code_with_colon() {
    assert_eq!(extract_code("Code: 12345").as_deref(), Some("12345"));
}

#[test]
fn code_with_hash() {
    assert_eq!(extract_code("Code #12345").as_deref(), Some("12345"));
}

#[test]
fn code_bare() {
    assert_eq!(extract_code("Code 98765").as_deref(), Some("98765"));
}

#[test]
fn code_case_insensitive() {
    assert_eq!(extract_code("coupon code:55555").as_deref(), Some("55555"));
}

#[test]
fn code_requires_digits() {
    assert_eq!(extract_code("Code: ABCDE"), None);
}

// -----------------------------------------------------------------------
// extract_expiration
// -----------------------------------------------------------------------

#[test]
fn expiration_short_year() {
    assert_eq!(extract_expiration("Exp. 1/5/25").as_deref(), Some("1/5/25"));
}

#[test]
fn expiration_long_year_without_period() {
    assert_eq!(
        extract_expiration("Exp 12/31/2025").as_deref(),
        Some("12/31/2025")
    );
}

#[test]
fn expiration_case_insensitive_no_space() {
    assert_eq!(extract_expiration("EXP.3/1/26").as_deref(), Some("3/1/26"));
}

#[test]
fn expiration_skips_words_starting_with_exp() {
    assert_eq!(
        extract_expiration("Expires soon. Exp 2/2/26").as_deref(),
        Some("2/2/26")
    );
}

#[test]
fn expiration_missing_date() {
    assert_eq!(extract_expiration("Exp. soon"), None);
}

// -----------------------------------------------------------------------
// extract_name_and_url
// -----------------------------------------------------------------------

#[test]
fn name_and_url_from_h2_anchor() {
    let result = with_first_article(&coupon_article("Cordless Drill", "$39.99", "111"), |a| {
        extract_name_and_url(a, BASE)
    });
    assert_eq!(
        result,
        Some((
            "Cordless Drill".to_owned(),
            "https://go.harborfreight.com/coupons/111/".to_owned()
        ))
    );
}

#[test]
fn name_and_url_h2_preferred_over_h3() {
    let body = r#"<article>
        <h3><a href="/second/">Second Heading</a></h3>
        <h2><a href="/first/">First Heading</a></h2>
    </article>"#;
    let result = with_first_article(body, |a| extract_name_and_url(a, BASE));
    assert_eq!(result.map(|(name, _)| name).as_deref(), Some("First Heading"));
}

#[test]
fn name_and_url_from_h3_when_no_h2() {
    let body = r#"<article><h3><a href="https://cdn.example.com/p">Pipe Wrench</a></h3></article>"#;
    let result = with_first_article(body, |a| extract_name_and_url(a, BASE));
    assert_eq!(
        result,
        Some((
            "Pipe Wrench".to_owned(),
            "https://cdn.example.com/p".to_owned()
        ))
    );
}

#[test]
fn name_and_url_falls_back_to_any_anchor_in_article() {
    let body = r#"<article>
        <h2>Heading Without Link</h2>
        <a href="/coupons/222/">Impact Driver</a>
    </article>"#;
    let result = with_first_article(body, |a| extract_name_and_url(a, BASE));
    assert_eq!(
        result,
        Some((
            "Impact Driver".to_owned(),
            "https://go.harborfreight.com/coupons/222/".to_owned()
        ))
    );
}

#[test]
fn name_is_whitespace_collapsed() {
    let body = r#"<article><h2><a href="/x/">
        20V   <strong>Hammer</strong>
        Drill
    </a></h2></article>"#;
    let result = with_first_article(body, |a| extract_name_and_url(a, BASE));
    assert_eq!(result.map(|(name, _)| name).as_deref(), Some("20V Hammer Drill"));
}

#[test]
fn name_of_four_chars_is_rejected() {
    let body = r#"<article><h2><a href="/x/">Vise</a></h2></article>"#;
    assert!(with_first_article(body, |a| extract_name_and_url(a, BASE)).is_none());
}

#[test]
fn name_of_five_chars_is_accepted() {
    let body = r#"<article><h2><a href="/x/">Clamp</a></h2></article>"#;
    assert!(with_first_article(body, |a| extract_name_and_url(a, BASE)).is_some());
}

#[test]
fn name_and_url_without_heading_is_none() {
    let body = r#"<article><a href="/x/">Floor Jack</a></article>"#;
    assert!(with_first_article(body, |a| extract_name_and_url(a, BASE)).is_none());
}

#[test]
fn name_and_url_without_anchor_is_none() {
    let body = r"<article><h2>Floor Jack</h2></article>";
    assert!(with_first_article(body, |a| extract_name_and_url(a, BASE)).is_none());
}

#[test]
fn name_and_url_without_href_is_none() {
    let body = r"<article><h2><a>Floor Jack</a></h2></article>";
    assert!(with_first_article(body, |a| extract_name_and_url(a, BASE)).is_none());
}

#[test]
fn url_relative_without_leading_slash_is_joined() {
    let body = r#"<article><h2><a href="coupons/333/">Floor Jack</a></h2></article>"#;
    let result = with_first_article(body, |a| extract_name_and_url(a, BASE));
    assert_eq!(
        result.map(|(_, url)| url).as_deref(),
        Some("https://go.harborfreight.com/coupons/333/")
    );
}

// -----------------------------------------------------------------------
// extract_image_url
// -----------------------------------------------------------------------

#[test]
fn image_from_src() {
    let body = r#"<article><img src="/a.png" data-src="/b.png"></article>"#;
    let result = with_first_article(body, extract_image_url);
    assert_eq!(result.as_deref(), Some("/a.png"));
}

#[test]
fn image_from_data_src_when_src_missing() {
    let body = r#"<article><img data-src="/lazy.png"></article>"#;
    let result = with_first_article(body, extract_image_url);
    assert_eq!(result.as_deref(), Some("/lazy.png"));
}

#[test]
fn image_from_data_src_when_src_empty() {
    let body = r#"<article><img src="" data-src="/lazy.png"></article>"#;
    let result = with_first_article(body, extract_image_url);
    assert_eq!(result.as_deref(), Some("/lazy.png"));
}

#[test]
fn image_missing() {
    let body = r"<article><p>No picture</p></article>";
    assert!(with_first_article(body, extract_image_url).is_none());
}

#[test]
fn image_uses_first_img_only() {
    let body = r#"<article><img alt="spacer"><img src="/second.png"></article>"#;
    assert!(with_first_article(body, extract_image_url).is_none());
}

// -----------------------------------------------------------------------
// parse_article / extract_coupons
// -----------------------------------------------------------------------

#[test]
fn parse_article_builds_full_coupon() {
    let coupon = with_first_article(&coupon_article("Cordless Drill", "$1,299.99", "444"), |a| {
        parse_article(a, BASE)
    })
    .expect("well-formed article");

    assert_eq!(coupon.name(), "Cordless Drill");
    assert_eq!(coupon.price(), dec("1299.99"));
    assert_eq!(coupon.code(), "444");
    assert_eq!(coupon.expiration(), "12/31/25");
    assert_eq!(
        coupon.image_url(),
        "https://images.harborfreight.com/hftweb/coupons/444.png"
    );
    assert_eq!(coupon.url(), "https://go.harborfreight.com/coupons/444/");
}

#[test]
fn parse_article_missing_price_is_none() {
    let body = coupon_article("Cordless Drill", "Great deal", "555");
    assert!(with_first_article(&body, |a| parse_article(a, BASE)).is_none());
}

#[test]
fn extract_coupons_ignores_articles_without_markers() {
    let body = r#"<article><h2><a href="/blog/">Store Hours Update</a></h2>
        <img src="/blog.png"><p>Now open late. $0 delivery fee.</p></article>
        <article><p>Just some text</p></article>"#;
    let extraction = extract_coupons(&page(body), BASE);
    assert!(extraction.coupons.is_empty());
    assert_eq!(extraction.articles, 2);
    assert_eq!(extraction.non_coupon, 2);
    assert_eq!(extraction.malformed, 0);
}

#[test]
fn extract_coupons_keeps_document_order_and_counts_malformed() {
    let body = [
        coupon_article("First Coupon Item", "$10.00", "1001"),
        coupon_article("Second Coupon Item", "no price here", "1002"),
        "<article><p>Newsletter signup</p></article>".to_owned(),
        coupon_article("Third Coupon Item", "$2,500", "1003"),
    ]
    .join("\n");

    let extraction = extract_coupons(&page(&body), BASE);
    let names: Vec<&str> = extraction.coupons.iter().map(Coupon::name).collect();
    assert_eq!(names, ["First Coupon Item", "Third Coupon Item"]);
    assert_eq!(extraction.articles, 4);
    assert_eq!(extraction.non_coupon, 1);
    assert_eq!(extraction.malformed, 1);
    assert_eq!(extraction.skipped(), 2);
}

#[test]
fn extract_coupons_every_field_populated_and_price_positive() {
    let body = (1..=5)
        .map(|i| coupon_article(&format!("Tool Number {i}"), &format!("${i}9.99"), &format!("{i}0000")))
        .collect::<Vec<_>>()
        .join("\n");
    let extraction = extract_coupons(&page(&body), BASE);
    assert_eq!(extraction.coupons.len(), 5);
    for coupon in &extraction.coupons {
        assert!(coupon.name().chars().count() >= MIN_NAME_CHARS);
        assert!(coupon.price() > Decimal::ZERO);
        assert!(!coupon.code().is_empty());
        assert!(!coupon.expiration().is_empty());
        assert!(!coupon.image_url().is_empty());
        assert!(coupon.url().starts_with("https://"));
    }
}
