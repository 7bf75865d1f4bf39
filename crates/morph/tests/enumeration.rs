use morph::{DefaultEnumMapper, EnumConfig, EnumMapper, Map, MapExt, Mapper};
use pretty_assertions::assert_eq;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, morph::Enum)]
enum Color {
    Red,
    Green,
    Blue,
}

#[derive(Debug, Clone, Copy, PartialEq, morph::Enum)]
enum Paint {
    Red,
    Green,
}

#[derive(Debug, Clone, Copy, PartialEq, morph::Enum)]
enum Hue {
    Red,
    Green,
    Blue,
    Violet,
}

#[derive(Debug, Clone, Copy, PartialEq, morph::Enum)]
enum Number {
    One,
    Two,
    Three,
    Four,
}

#[derive(Debug, Clone, Copy, PartialEq, morph::Enum)]
enum Letter {
    A,
    B,
    C,
    D,
}

#[derive(Debug, Clone, Copy, PartialEq, morph::Enum)]
enum Mixed {
    One,
    Two,
    C,
    Four,
}

// ---------------------------------------------------------------------------
// Default enum mapper
// ---------------------------------------------------------------------------

#[test]
fn maps_variants_by_name() {
    let mapper = DefaultEnumMapper::<Color, Paint>::new().unwrap();
    mapper.validate().unwrap();

    assert_eq!(mapper.map_value(Color::Red).unwrap(), Paint::Red);
    assert_eq!(mapper.map_value(Color::Green).unwrap(), Paint::Green);
}

#[test]
fn source_variants_without_counterpart_fail_when_mapped() {
    let mapper = DefaultEnumMapper::<Color, Paint>::new().unwrap();

    let err = mapper.map_value(Color::Blue).unwrap_err();
    assert!(err.is_unmapped_value());
    assert_eq!(err.to_string(), "no mapping for value 'Blue' of type 'Color'");
}

#[test]
fn every_target_variant_must_be_produced() {
    let mapper = DefaultEnumMapper::<Color, Hue>::new().unwrap();

    let err = mapper.validate().unwrap_err();
    assert_eq!(
        err.diagnostics().unwrap(),
        ["type 'Hue' contains unmapped members: Violet."]
    );

    // Mapping reports the same configuration error
    assert!(mapper.map_value(Color::Red).unwrap_err().ptr_eq(&err));
}

#[test]
fn unmapped_target_variants_are_listed_in_order() {
    let err = DefaultEnumMapper::<Number, Letter>::new()
        .unwrap()
        .validate()
        .unwrap_err();
    assert_eq!(
        err.diagnostics().unwrap(),
        ["type 'Letter' contains unmapped members: A, B, C, D."]
    );

    let err = DefaultEnumMapper::<Mixed, Number>::new()
        .unwrap()
        .validate()
        .unwrap_err();
    assert_eq!(
        err.diagnostics().unwrap(),
        ["type 'Number' contains unmapped members: Three."]
    );
}

#[test]
fn nullable_enums_pass_none_through() {
    let mapper = DefaultEnumMapper::<Option<Color>, Option<Paint>>::new().unwrap();

    assert_eq!(mapper.map_value(None).unwrap(), None);
    assert_eq!(mapper.map_value(Some(Color::Green)).unwrap(), Some(Paint::Green));
}

#[test]
fn rejects_invalid_type_arguments() {
    let err = DefaultEnumMapper::<i32, Paint>::new().err().unwrap();
    assert!(err.is_invalid_type_argument());
    assert_eq!(
        err.to_string(),
        "invalid type argument `i32`: type must be an enum"
    );

    let err = DefaultEnumMapper::<Option<Color>, Paint>::new().err().unwrap();
    assert_eq!(
        err.to_string(),
        "invalid type argument `Paint`: type must be nullable because the source is nullable"
    );

    let err = DefaultEnumMapper::<Color, Option<Paint>>::new().err().unwrap();
    assert!(err.is_invalid_type_argument());
}

// ---------------------------------------------------------------------------
// Configured enum mapper
// ---------------------------------------------------------------------------

#[test]
fn configured_mappings() {
    let mapper = EnumMapper::new(|config: &mut EnumConfig<Hue, Paint>| {
        config.map(Hue::Red).to(Paint::Red);
        config.map(Hue::Green).to(Paint::Green);
        config.map(Hue::Blue).to(Paint::Green);
        config.map(Hue::Violet).raise("violet is not for sale");
    })
    .unwrap();

    mapper.validate().unwrap();
    assert_eq!(mapper.map_value(Hue::Blue).unwrap(), Paint::Green);
    assert_eq!(
        mapper.map_value(Hue::Violet).unwrap_err().to_string(),
        "violet is not for sale"
    );
}

#[test]
fn every_source_variant_must_be_configured() {
    let mapper = EnumMapper::new(|config: &mut EnumConfig<Color, Paint>| {
        config.map(Color::Red).to(Paint::Red);
    })
    .unwrap();

    assert_eq!(
        mapper.validate().unwrap_err().diagnostics().unwrap(),
        ["source type 'Color' contains unmapped members: Green, Blue."]
    );
}

#[test]
fn raised_errors_are_built_on_each_mapping() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counted = calls.clone();

    let mapper = EnumMapper::new(move |config: &mut EnumConfig<Color, Paint>| {
        let counted = counted.clone();
        config.map(Color::Red).to(Paint::Red);
        config.map(Color::Green).to(Paint::Green);
        config.map(Color::Blue).raise_with(move || {
            counted.fetch_add(1, Ordering::SeqCst);
            morph::err!("no blue paint")
        });
    })
    .unwrap();

    mapper.validate().unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    mapper.map_value(Color::Blue).unwrap_err();
    mapper.map_value(Color::Blue).unwrap_err();
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn nullable_targets_can_map_to_none() {
    let mapper = EnumMapper::new(|config: &mut EnumConfig<Option<Color>, Option<Paint>>| {
        config.map(Some(Color::Red)).to(Some(Paint::Red));
        config.map(Some(Color::Green)).to(Some(Paint::Green));
        config.map(Some(Color::Blue)).to(None);
    })
    .unwrap();

    assert_eq!(mapper.map_value(Some(Color::Blue)).unwrap(), None);
    assert_eq!(mapper.map_value(None).unwrap(), None);
}

// ---------------------------------------------------------------------------
// Enum members of mapped models
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Clone, morph::Model)]
struct Car {
    color: Option<Color>,
    model: String,
}

#[derive(Debug, Default, Clone, morph::Model)]
struct CarDto {
    color: Option<Paint>,
    model: String,
}

#[derive(Debug, Clone, morph::Model)]
struct Swatch {
    color: Color,
}

#[derive(Debug, Clone, morph::Model)]
struct Palette {
    color: Hue,
}

#[test]
fn enum_members_map_by_variant_name() {
    let mapper = Mapper::<Car, CarDto>::default();

    let dto = mapper
        .map_new(&Car {
            color: Some(Color::Green),
            model: "T".to_string(),
        })
        .unwrap();
    assert_eq!(dto.color, Some(Paint::Green));

    let dto = mapper.map_new(&Car::default()).unwrap();
    assert_eq!(dto.color, None);

    let err = mapper
        .map_new(&Car {
            color: Some(Color::Blue),
            model: "T".to_string(),
        })
        .unwrap_err();
    assert!(err.is_unmapped_value());
}

#[test]
fn incomplete_enum_members_are_left_unbound() {
    let mapper = Mapper::<Swatch, Palette>::default();

    assert_eq!(
        mapper.validate().unwrap_err().diagnostics().unwrap(),
        ["a mapping was not provided for target member 'Palette.color' from source 'Swatch'"]
    );
}
