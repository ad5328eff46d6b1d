mod common;

use clinic_site::adapters::script::load_script;
use clinic_site::domain::model::FormKind;
use clinic_site::utils::validation::Validate;
use clinic_site::{Effect, SimulatedBackend, SiteConfig, SiteEngine};
use common::{clock, count};
use std::path::Path;

fn repo_file(name: &str) -> std::path::PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join(name)
}

#[test]
fn test_bundled_site_config_is_valid() {
    let config = SiteConfig::from_file(repo_file("site.toml")).unwrap();
    assert!(config.validate().is_ok());
    assert_eq!(config.layout.sections.len(), 5);
    assert_eq!(config.layout.forms.len(), 2);
}

#[tokio::test]
async fn test_demo_session_replays_end_to_end() {
    let config = SiteConfig::from_file(repo_file("site.toml")).unwrap();
    let steps = load_script(repo_file("demos/session.jsonl")).unwrap();

    let (mut engine, _) = SiteEngine::start(
        config.site_name(),
        &config.layout,
        None,
        SimulatedBackend::new(),
        clock(),
    );

    let mut effects = Vec::new();
    let emitted = engine
        .run_script(&steps, false, |effect| effects.push(effect.clone()))
        .await;
    assert_eq!(emitted, effects.len());

    assert_eq!(engine.app().navigation().unwrap().current(), Some("contact"));
    assert!(effects.contains(&Effect::Focus {
        form: FormKind::Contact,
        field: "name".to_string(),
    }));
    assert_eq!(count(&effects, |e| matches!(e, Effect::ShowBanner { .. })), 1);
    assert!(effects.contains(&Effect::RemoveBanner {
        form: FormKind::Contact
    }));
    assert!(effects.contains(&Effect::SetBackToTopVisible { visible: true }));
    assert_eq!(engine.app().carousel().unwrap().current(), 2);
    assert!(!engine.app().menu().unwrap().is_open());
}
