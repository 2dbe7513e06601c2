pub const MENU_NEW_WINDOW: &str = "menu_new_window";
pub const MENU_RELOAD_WINDOW: &str = "menu_reload_window";
pub const MENU_TOGGLE_DEVTOOLS: &str = "menu_toggle_devtools";
pub const MENU_QUIT: &str = "menu_quit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMenuAction {
    NewWindow,
    ReloadWindow,
    ToggleDevtools,
    Quit,
}

pub fn action_from_menu_id(menu_id: &str) -> Option<AppMenuAction> {
    match menu_id {
        MENU_NEW_WINDOW => Some(AppMenuAction::NewWindow),
        MENU_RELOAD_WINDOW => Some(AppMenuAction::ReloadWindow),
        MENU_TOGGLE_DEVTOOLS => Some(AppMenuAction::ToggleDevtools),
        MENU_QUIT => Some(AppMenuAction::Quit),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_from_menu_id_maps_all_known_actions() {
        assert_eq!(
            action_from_menu_id(MENU_NEW_WINDOW),
            Some(AppMenuAction::NewWindow)
        );
        assert_eq!(
            action_from_menu_id(MENU_RELOAD_WINDOW),
            Some(AppMenuAction::ReloadWindow)
        );
        assert_eq!(
            action_from_menu_id(MENU_TOGGLE_DEVTOOLS),
            Some(AppMenuAction::ToggleDevtools)
        );
        assert_eq!(action_from_menu_id(MENU_QUIT), Some(AppMenuAction::Quit));
    }

    #[test]
    fn action_from_menu_id_returns_none_for_unknown_menu_id() {
        assert_eq!(action_from_menu_id("unknown-menu"), None);
    }
}
