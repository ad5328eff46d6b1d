use crate::domain::event::Effect;
use crate::domain::model::ClickTarget;

/// Mobile hamburger menu. `SetMenuOpen` carries the `active` class, the
/// `aria-expanded` attribute and the hamburger icon state together.
#[derive(Debug, Default)]
pub struct MobileMenu {
    open: bool,
}

impl MobileMenu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn initialize(&self) -> Vec<Effect> {
        vec![Effect::SetMenuOpen { open: false }]
    }

    pub fn toggle(&mut self) -> Vec<Effect> {
        self.open = !self.open;
        vec![Effect::SetMenuOpen { open: self.open }]
    }

    pub fn close(&mut self) -> Vec<Effect> {
        if !self.open {
            return Vec::new();
        }
        self.open = false;
        vec![Effect::SetMenuOpen { open: false }]
    }

    /// Clicks on the toggle itself are handled by `toggle`; clicks inside
    /// the menu keep it open.
    pub fn document_click(&mut self, target: ClickTarget) -> Vec<Effect> {
        match target {
            ClickTarget::Elsewhere => self.close(),
            ClickTarget::MenuToggle | ClickTarget::Menu => Vec::new(),
        }
    }

    pub fn key_pressed(&mut self, key: &str) -> Vec<Effect> {
        if key == "Escape" {
            self.close()
        } else {
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_flips_state() {
        let mut menu = MobileMenu::new();
        assert_eq!(menu.toggle(), vec![Effect::SetMenuOpen { open: true }]);
        assert!(menu.is_open());
        assert_eq!(menu.toggle(), vec![Effect::SetMenuOpen { open: false }]);
        assert!(!menu.is_open());
    }

    #[test]
    fn test_outside_click_closes() {
        let mut menu = MobileMenu::new();
        menu.toggle();
        assert!(menu.document_click(ClickTarget::Menu).is_empty());
        assert!(menu.is_open());
        assert_eq!(
            menu.document_click(ClickTarget::Elsewhere),
            vec![Effect::SetMenuOpen { open: false }]
        );
    }

    #[test]
    fn test_escape_closes_only_when_open() {
        let mut menu = MobileMenu::new();
        assert!(menu.key_pressed("Escape").is_empty());
        menu.toggle();
        assert!(menu.key_pressed("Enter").is_empty());
        assert_eq!(
            menu.key_pressed("Escape"),
            vec![Effect::SetMenuOpen { open: false }]
        );
    }
}
