//! Keybinding registry: maps key events to portal actions per context.
use crossterm::event::{KeyCode, KeyModifiers};
use std::collections::HashMap;

// ============================================================================
// Action Enum
// ============================================================================

/// All user-facing actions that can be triggered by keybindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Quit,
    NavDown,
    NavUp,
    CycleFocus,
    Back,
    Select,
    Home,
    ShowSaved,
    ToggleSave,
    EnterSearch,
    OpenInBrowser,
    LoadMore,
    CycleTheme,
    ShowHelp,
}

impl Action {
    /// Description for the help screen.
    pub fn describe(self) -> &'static str {
        match self {
            Self::Quit => "Sair",
            Self::NavDown => "Descer",
            Self::NavUp => "Subir",
            Self::CycleFocus => "Alternar painel",
            Self::Back => "Voltar aos destaques",
            Self::Select => "Selecionar / abrir",
            Self::Home => "Destaques do feed",
            Self::ShowSaved => "Artigos salvos",
            Self::ToggleSave => "Salvar / remover dos salvos",
            Self::EnterSearch => "Buscar notícias",
            Self::OpenInBrowser => "Abrir no navegador",
            Self::LoadMore => "Carregar mais notícias",
            Self::CycleTheme => "Alternar tema",
            Self::ShowHelp => "Mostrar ajuda",
        }
    }
}

// ============================================================================
// Context Enum
// ============================================================================

/// Dispatch context: determines which bindings are active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Context {
    Global,
    Categories,
    ArticleList,
}

// ============================================================================
// Key Specification
// ============================================================================

/// A key event: code + modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeySpec {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeySpec {
    pub const fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    pub const fn plain(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    pub const fn ctrl(c: char) -> Self {
        Self::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }
}

/// Format a KeySpec for the help screen.
fn format_key(key: &KeySpec) -> String {
    let modifier = if key.modifiers.contains(KeyModifiers::CONTROL) {
        "Ctrl+"
    } else {
        ""
    };

    let key_name = match key.code {
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::Up => "Up".to_string(),
        KeyCode::Down => "Down".to_string(),
        KeyCode::Backspace => "Backspace".to_string(),
        _ => "?".to_string(),
    };

    format!("{}{}", modifier, key_name)
}

// ============================================================================
// Keybinding Registry
// ============================================================================

/// Default keybindings with context-aware lookup.
///
/// The same key can map to different actions in different contexts; a
/// context-specific binding wins over the global one.
pub struct KeybindingRegistry {
    lookup: HashMap<(Context, KeySpec), Action>,
    /// Registration order, for the help screen.
    bindings: Vec<(Context, KeySpec, Action)>,
}

impl KeybindingRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            lookup: HashMap::new(),
            bindings: Vec::new(),
        };
        registry.register_defaults();
        registry
    }

    fn bind(&mut self, context: Context, key: KeySpec, action: Action) {
        self.lookup.insert((context, key), action);
        self.bindings.push((context, key, action));
    }

    fn register_defaults(&mut self) {
        use KeyCode::Char;

        // === Global ===
        self.bind(Context::Global, KeySpec::plain(Char('q')), Action::Quit);
        self.bind(Context::Global, KeySpec::ctrl('c'), Action::Quit);
        self.bind(Context::Global, KeySpec::plain(Char('j')), Action::NavDown);
        self.bind(Context::Global, KeySpec::plain(KeyCode::Down), Action::NavDown);
        self.bind(Context::Global, KeySpec::plain(Char('k')), Action::NavUp);
        self.bind(Context::Global, KeySpec::plain(KeyCode::Up), Action::NavUp);
        self.bind(Context::Global, KeySpec::plain(KeyCode::Tab), Action::CycleFocus);
        self.bind(Context::Global, KeySpec::plain(KeyCode::Esc), Action::Back);
        self.bind(Context::Global, KeySpec::plain(Char('h')), Action::Home);
        self.bind(Context::Global, KeySpec::plain(Char('S')), Action::ShowSaved);
        self.bind(Context::Global, KeySpec::plain(Char('/')), Action::EnterSearch);
        self.bind(Context::Global, KeySpec::plain(Char('t')), Action::CycleTheme);
        self.bind(Context::Global, KeySpec::plain(Char('?')), Action::ShowHelp);

        // === Categories ===
        self.bind(Context::Categories, KeySpec::plain(KeyCode::Enter), Action::Select);

        // === Article list ===
        self.bind(Context::ArticleList, KeySpec::plain(KeyCode::Enter), Action::Select);
        self.bind(Context::ArticleList, KeySpec::plain(Char('s')), Action::ToggleSave);
        self.bind(Context::ArticleList, KeySpec::plain(Char('o')), Action::OpenInBrowser);
        self.bind(Context::ArticleList, KeySpec::plain(Char('m')), Action::LoadMore);
    }

    /// Look up the action for a key, trying `context` before Global.
    pub fn action_for_key(
        &self,
        code: KeyCode,
        modifiers: KeyModifiers,
        context: Context,
    ) -> Option<Action> {
        // Shifted letters arrive as uppercase chars with SHIFT set.
        let modifiers = match code {
            KeyCode::Char(_) => modifiers.difference(KeyModifiers::SHIFT),
            _ => modifiers,
        };
        let key = KeySpec::new(code, modifiers);

        if let Some(&action) = self.lookup.get(&(context, key)) {
            return Some(action);
        }
        if context != Context::Global {
            return self.lookup.get(&(Context::Global, key)).copied();
        }
        None
    }

    /// All bindings as (context, key, description), in registration order.
    pub fn all_bindings(&self) -> Vec<(Context, String, &'static str)> {
        self.bindings
            .iter()
            .map(|(ctx, key, action)| (*ctx, format_key(key), action.describe()))
            .collect()
    }
}

impl Default for KeybindingRegistry {
    fn default() -> Self {
        Self::new()
    }
}
