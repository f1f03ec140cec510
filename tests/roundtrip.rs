//! Roundtrip serialisation tests for promotion records.
//!
//! Each `#[case]` is isolated — no shared state.

use promotion_registry::{Promotion, PromotionName};
use rstest::rstest;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn minimal_promotion() -> Promotion {
    Promotion::new(PromotionName::from("minimal"))
}

fn full_promotion() -> Promotion {
    let mut p = Promotion::new(PromotionName::from("full"));
    p.description = Some("promotes a trainee to a full member".to_string());
    p.groups = vec!["member".to_string(), "builder".to_string()];
    p.permissions = vec![
        "essentials.home".to_string(),
        "worldedit.use".to_string(),
    ];
    p
}

fn unicode_promotion() -> Promotion {
    let mut p = Promotion::new(PromotionName::from("アップグレード-повышение"));
    p.description = Some("Émojis & spéçïal chars: <>&\"' 🚀".to_string());
    p.groups = vec!["групп-один".to_string()];
    p.permissions = vec!["插件.权限".to_string()];
    p
}

// ---------------------------------------------------------------------------
// Parameterised roundtrip test
// ---------------------------------------------------------------------------

#[rstest]
#[case("minimal", minimal_promotion())]
#[case("all_fields", full_promotion())]
#[case("unicode_strings", unicode_promotion())]
fn promotion_roundtrip(#[case] label: &str, #[case] promotion: Promotion) {
    let yaml = serde_yaml::to_string(&promotion)
        .unwrap_or_else(|e| panic!("[{label}] serialize failed: {e}"));
    let back: Promotion = serde_yaml::from_str(&yaml)
        .unwrap_or_else(|e| panic!("[{label}] deserialize failed: {e}"));

    assert_eq!(promotion.description, back.description, "[{label}] description");
    assert_eq!(promotion.groups, back.groups, "[{label}] groups");
    assert_eq!(promotion.permissions, back.permissions, "[{label}] permissions");
    assert_eq!(promotion.created_at, back.created_at, "[{label}] created_at");
    assert_eq!(promotion.updated_at, back.updated_at, "[{label}] updated_at");

    // The name rides on the registry key, never the file body.
    assert_eq!(back.name().as_str(), "", "[{label}] name must not roundtrip");
}

#[rstest]
#[case("minimal", minimal_promotion())]
#[case("all_fields", full_promotion())]
fn serialized_form_is_stable(#[case] label: &str, #[case] promotion: Promotion) {
    let first = serde_yaml::to_string(&promotion)
        .unwrap_or_else(|e| panic!("[{label}] serialize failed: {e}"));
    let back: Promotion = serde_yaml::from_str(&first)
        .unwrap_or_else(|e| panic!("[{label}] deserialize failed: {e}"));
    let second = serde_yaml::to_string(&back)
        .unwrap_or_else(|e| panic!("[{label}] reserialize failed: {e}"));
    assert_eq!(first, second, "[{label}] serialized form must be stable");
}
