//! Behavioural tests for the substitution backend, exercised through the
//! [`MessageFormatter`] trait the way a registry drives it.

use parlance::{MessageContext, MessageFormatter, Template, TemplateFormatter, langid};
use rstest::rstest;

fn context_of(pairs: &[(&str, &str)]) -> MessageContext {
    pairs.iter().copied().collect()
}

#[rstest]
#[case::simple_token("hello, {token}!", &[("token", "world")], "hello, world!")]
#[case::intl_token(
    "hello, {token, with {{intl} junk}}!",
    &[("token", "world")],
    "hello, world!"
)]
#[case::token_with_whitespace(
    "a malformed { token} appears",
    &[("token", "world")],
    "a malformed world appears"
)]
#[case::escaped_single_quote("well that wasn''t expected", &[], "well that wasn't expected")]
#[case::escaped_braces(
    "this is not a '{token}'!",
    &[("token", "world")],
    "this is not a {token}!"
)]
fn substitutes_like_the_icu_subset(
    #[case] format: &str,
    #[case] pairs: &[(&str, &str)],
    #[case] expected: &str,
) {
    let rendered = TemplateFormatter::new()
        .format(&langid!("und"), format, &context_of(pairs))
        .expect("the built-in backend never fails");
    assert_eq!(rendered, expected);
}

#[rstest]
#[case::date_style(
    "one small step for man on {footprint, date, medium}",
    &[("footprint", "-14241600")],
    "one small step for man on -14241600"
)]
#[case::currency_style(
    "that will set you back about {price, number, currency}",
    &[("price", "20")],
    "that will set you back about 20"
)]
#[case::integer_width_style(
    "agent {id, number, :: integer-width/*000}",
    &[("id", "7")],
    "agent 7"
)]
fn predefined_styles_degrade_to_raw_values(
    #[case] format: &str,
    #[case] pairs: &[(&str, &str)],
    #[case] expected: &str,
) {
    let rendered = TemplateFormatter::new()
        .format(&langid!("en-US"), format, &context_of(pairs))
        .expect("sub-formats are discarded, not evaluated");
    assert_eq!(rendered, expected);
}

#[test]
fn literal_templates_pass_through_any_context() {
    let context = context_of(&[("token", "world"), ("other", "noise")]);
    let rendered = TemplateFormatter::new()
        .format(&langid!("und"), "no tokens at all", &context)
        .expect("the built-in backend never fails");
    assert_eq!(rendered, "no tokens at all");
}

#[test]
fn unresolved_placeholders_stay_visible() {
    let rendered = TemplateFormatter::new()
        .format(&langid!("und"), "hi {missing}", &MessageContext::new())
        .expect("the built-in backend never fails");
    assert_eq!(rendered, "hi {missing}");
}

#[test]
fn parsing_is_a_pure_function_of_the_format() {
    let format = "hello, {token, with {{intl} junk}}!";
    let first = Template::parse(format);
    let second = Template::parse(format);
    assert_eq!(first.segments(), second.segments());
}
