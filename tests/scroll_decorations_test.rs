mod common;

use clinic_site::domain::model::NavigationMode;
use clinic_site::{Effect, Event};
use common::{count, start};
use std::time::Duration;

#[tokio::test]
async fn test_scroll_spy_highlights_one_link_after_throttle() {
    let (mut engine, init) = start(NavigationMode::Scroll, None);
    assert!(init.contains(&Effect::SetActiveNavLink {
        id: Some("home".to_string())
    }));

    // reference = 1500 + 80 + 0 + 100 = 1680, inside "doctors" [1600, 2400)
    let effects = engine.dispatch(&Event::Scroll { y: 1500.0 }).await;
    assert_eq!(
        count(&effects, |e| matches!(e, Effect::SetActiveNavLink { .. })),
        0
    );

    let effects = engine.advance(Duration::from_millis(10)).await;
    assert_eq!(
        effects
            .iter()
            .filter(|e| matches!(e, Effect::SetActiveNavLink { .. }))
            .collect::<Vec<_>>(),
        vec![&Effect::SetActiveNavLink {
            id: Some("doctors".to_string())
        }]
    );
    assert_eq!(engine.app().scroll().active_link(), Some("doctors"));
}

#[tokio::test]
async fn test_burst_of_scrolls_handled_once_with_latest_position() {
    let (mut engine, _) = start(NavigationMode::Scroll, None);

    for y in [100.0, 200.0, 900.0] {
        engine.dispatch(&Event::Scroll { y }).await;
    }
    let effects = engine.advance(Duration::from_millis(10)).await;
    assert!(effects.contains(&Effect::SetBackToTopVisible { visible: true }));
    assert!(effects.contains(&Effect::SetActiveNavLink {
        id: Some("services".to_string())
    }));

    engine.dispatch(&Event::Scroll { y: 0.0 }).await;
    let effects = engine.advance(Duration::from_millis(10)).await;
    assert!(effects.contains(&Effect::SetBackToTopVisible { visible: false }));
    assert!(effects.contains(&Effect::SetHeaderScrolled { scrolled: false }));
}

#[tokio::test]
async fn test_reveal_on_scroll_is_immediate() {
    let (mut engine, init) = start(NavigationMode::Scroll, None);
    assert!(init.contains(&Effect::PrepareReveal { element: 0 }));
    assert!(!init.contains(&Effect::Reveal { element: 0 }));

    // card 0 at 900: 900 - 200 = 700 < 750
    let effects = engine.dispatch(&Event::Scroll { y: 200.0 }).await;
    assert!(effects.contains(&Effect::Reveal { element: 0 }));
    assert!(!effects.contains(&Effect::Reveal { element: 1 }));
}

#[tokio::test]
async fn test_section_mode_disables_scroll_spy() {
    let (mut engine, _) = start(NavigationMode::Sections, None);
    engine.dispatch(&Event::Scroll { y: 1500.0 }).await;
    let effects = engine.advance(Duration::from_millis(10)).await;
    assert_eq!(
        count(&effects, |e| matches!(e, Effect::SetActiveNavLink { .. })),
        0
    );
}

#[tokio::test]
async fn test_back_to_top_click_smooth_scrolls() {
    let (mut engine, init) = start(NavigationMode::Scroll, None);
    assert!(init.contains(&Effect::SetAriaLabel {
        control: clinic_site::domain::model::Control::BackToTop,
        label: "Back to top".to_string(),
    }));

    let effects = engine.dispatch(&Event::BackToTopClicked).await;
    assert_eq!(
        effects,
        vec![Effect::ScrollTo {
            top: 0.0,
            smooth: true
        }]
    );
}
