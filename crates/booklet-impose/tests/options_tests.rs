use booklet_impose::*;

#[test]
fn test_validation_sheets_per_signature() {
    let mut options = BookletOptions::default();
    assert!(options.validate().is_ok());

    options.sheets_per_signature = 0;
    match options.validate() {
        Err(ImposeError::Config(msg)) => assert!(msg.contains("Sheets per signature")),
        _ => panic!("Expected Config error"),
    }
}

#[test]
fn test_validation_text_options() {
    let mut options = BookletOptions::default();
    options.text.regions_per_side = 3;
    assert!(options.validate().is_err());

    let mut options = BookletOptions::default();
    options.text.font_size = 0.0;
    assert!(options.validate().is_err());

    let mut options = BookletOptions::default();
    options.text.heading_scale = 0.5;
    assert!(options.validate().is_err());
}

#[test]
fn test_paper_sizes() {
    assert_eq!(PaperSize::A5.dimensions_mm(), (148.0, 210.0));
    assert_eq!(
        PaperSize::A6.dimensions_with_orientation(Orientation::Landscape),
        (148.0, 105.0)
    );
}

#[test]
fn test_density_counts() {
    assert_eq!(Density::Four.images_per_region(), 4);
    assert_eq!(Density::from_count(2), Some(Density::Two));
    assert_eq!(Density::from_count(3), None);
}

#[cfg(feature = "serde")]
#[test]
fn test_options_save_and_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("options.json");

    let mut options = BookletOptions {
        paper_size: PaperSize::A5,
        density: Density::Two,
        sheets_per_signature: 3,
        fold_direction: FoldDirection::RightStart,
        page_order: PageOrder::Spread,
        leading_blanks: 2,
        ..Default::default()
    };
    options.page_numbers.start = 5;
    options.text.font_path = Some("fonts/NotoSansSC.ttf".into());

    options.save(&path).unwrap();
    let loaded = BookletOptions::load(&path).unwrap();
    assert_eq!(loaded, options);
}

#[cfg(feature = "serde")]
#[test]
fn test_partial_config_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("partial.json");
    std::fs::write(&path, r#"{ "sheets_per_signature": 2, "text": { "font_size": 12.0 } }"#)
        .unwrap();

    let loaded = BookletOptions::load(&path).unwrap();
    assert_eq!(loaded.sheets_per_signature, 2);
    assert_eq!(loaded.text.font_size, 12.0);
    assert_eq!(loaded.density, Density::One);
    assert!(loaded.fold_guide);
}

#[cfg(feature = "serde")]
#[test]
fn test_malformed_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.json");
    std::fs::write(&path, "{ not json").unwrap();
    assert!(matches!(
        BookletOptions::load(&path),
        Err(ImposeError::Config(_))
    ));
}
