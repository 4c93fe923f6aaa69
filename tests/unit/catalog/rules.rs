use super::*;

fn catalog_json() -> &'static str {
    r#"{
        "formats": [
            {
                "name": "SLOT1_WEB",
                "width": 800,
                "height": 800,
                "rules": {
                    "type": "standard",
                    "margin": {"x": 20, "y": 20},
                    "logo_area": {"width": 200, "height": 100},
                    "composition_area": {}
                }
            },
            {
                "name": "SLOT1_WEB_PRE",
                "width": 800,
                "height": 800,
                "rules": {"type": "copy", "source": "SLOT1_WEB"}
            },
            {
                "name": "BRAND_LOGO",
                "width": 400,
                "height": 400,
                "rules": {"type": "logo_only_centered_white_bg", "logo_area": {"width": 300, "height": 300}}
            },
            {
                "name": "HERO",
                "width": 1200,
                "height": 600
            }
        ]
    }"#
}

#[test]
fn parses_and_indexes_formats() {
    let catalog = FormatCatalog::from_json(catalog_json()).unwrap();
    assert_eq!(catalog.len(), 4);
    let slot = catalog.get("SLOT1_WEB").unwrap();
    assert_eq!(slot.rules.rule_type, RuleType::Standard);
    assert!(slot.rules.has_composition_area());
    assert_eq!(slot.rules.margin(), Margin { x: 20, y: 20 });
}

#[test]
fn copy_rules_resolve_once_at_load() {
    let catalog = FormatCatalog::from_json(catalog_json()).unwrap();
    let pre = catalog.get("SLOT1_WEB_PRE").unwrap();
    assert_eq!(pre.rules.rule_type, RuleType::Standard);
    assert!(pre.rules.has_composition_area());
    assert_eq!(
        pre.rules.logo_area,
        Some(LogoArea {
            width: 200,
            height: 100
        })
    );
}

#[test]
fn dangling_copy_stays_copy_and_dispatches_as_standard() {
    let json = r#"{"formats": [
        {"name": "X", "width": 10, "height": 10, "rules": {"type": "copy", "source": "NOPE"}}
    ]}"#;
    let catalog = FormatCatalog::from_json(json).unwrap();
    let x = catalog.get("X").unwrap();
    assert_eq!(x.rules.rule_type, RuleType::Copy);
    assert_eq!(x.rules.rule_type.effective(), RuleType::Standard);
}

#[test]
fn missing_rules_default_to_full_bleed() {
    let catalog = FormatCatalog::from_json(catalog_json()).unwrap();
    let hero = catalog.get("HERO").unwrap();
    assert_eq!(hero.rules.rule_type, RuleType::FullBleed);
    assert!(!hero.rules.has_composition_area());
}

#[test]
fn unknown_rule_type_maps_to_catch_all() {
    let json = r#"{"formats": [
        {"name": "X", "width": 10, "height": 10, "rules": {"type": "hologram"}}
    ]}"#;
    let catalog = FormatCatalog::from_json(json).unwrap();
    let x = catalog.get("X").unwrap();
    assert_eq!(x.rules.rule_type, RuleType::Unknown);
    assert_eq!(x.rules.rule_type.effective(), RuleType::Standard);
}

#[test]
fn zero_dimension_is_rejected() {
    let json = r#"{"formats": [{"name": "X", "width": 0, "height": 10}]}"#;
    assert!(FormatCatalog::from_json(json).is_err());
}

#[test]
fn unreadable_catalog_degrades_to_empty() {
    let catalog = FormatCatalog::load(std::path::Path::new("/nonexistent/formats.json"));
    assert!(catalog.is_empty());
}

#[test]
fn logo_only_classification() {
    assert!(RuleType::LogoOnlyCentered.is_logo_only());
    assert!(RuleType::LogoOnlyFill.is_logo_only());
    assert!(RuleType::LogoOnlyCenteredWhiteBg.is_logo_only());
    assert!(!RuleType::Standard.is_logo_only());
    assert!(!RuleType::SplitLeftWhite.is_logo_only());
}
