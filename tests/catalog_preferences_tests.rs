use showcase_sim::catalog::{self, Category, SERVICES};
use showcase_sim::config::Config;
use showcase_sim::preferences::{PreferenceStore, Theme};
use showcase_sim::DemoId;
use tempfile::tempdir;

#[test]
fn test_category_filters_partition_the_catalog() {
    assert_eq!(catalog::filter(Category::All).len(), 6);
    assert_eq!(catalog::filter(Category::Bots).len(), 2);
    let split: usize = Category::ALL[1..]
        .iter()
        .map(|c| catalog::filter(*c).len())
        .sum();
    assert_eq!(split, SERVICES.len());
}

#[test]
fn test_services_link_to_existing_demos() {
    let linked: Vec<DemoId> = SERVICES.iter().filter_map(catalog::demo_for).collect();
    assert_eq!(
        linked,
        vec![
            DemoId::Messaging,
            DemoId::Excel,
            DemoId::Marketplace,
            DemoId::Integration,
            DemoId::Insight
        ]
    );
}

#[test]
fn test_theme_roundtrip_through_configured_path() {
    let dir = tempdir().unwrap();
    let mut config = Config::default();
    config.preferences.path = Some(dir.path().join("prefs.toml"));

    let mut prefs = PreferenceStore::load(config.preferences_path()).unwrap();
    assert_eq!(prefs.theme(), Theme::Dark);
    prefs.toggle_theme().unwrap();
    prefs.toggle_theme().unwrap();
    prefs.toggle_theme().unwrap();

    let reread = PreferenceStore::load(config.preferences_path()).unwrap();
    assert_eq!(reread.theme(), Theme::Light);
}
