//! Debug parameter panel state.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Flag {
    ToonOutline,
    FilmGrain,
    Glitch,
}

impl Flag {
    pub fn label(self) -> &'static str {
        match self {
            Flag::ToonOutline => "useToonOutline",
            Flag::FilmGrain => "usePostFilmGrain",
            Flag::Glitch => "usePostGlitch",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParamPanel {
    entries: Vec<(Flag, bool)>,
}

impl ParamPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, flag: Flag, value: bool) -> Self {
        self.entries.push((flag, value));
        self
    }

    pub fn entries(&self) -> &[(Flag, bool)] {
        &self.entries
    }

    pub fn get(&self, flag: Flag) -> Option<bool> {
        self.entries
            .iter()
            .find_map(|&(f, value)| (f == flag).then_some(value))
    }

    /// Record a new value. Returns `false` for flags this panel does not show.
    pub fn set(&mut self, flag: Flag, value: bool) -> bool {
        match self.entries.iter_mut().find(|(f, _)| *f == flag) {
            Some(entry) => {
                entry.1 = value;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_only_touches_registered_flags() {
        let mut panel = ParamPanel::new().with(Flag::FilmGrain, true);
        assert!(panel.set(Flag::FilmGrain, false));
        assert_eq!(panel.get(Flag::FilmGrain), Some(false));
        assert!(!panel.set(Flag::Glitch, false));
        assert_eq!(panel.get(Flag::Glitch), None);
    }
}
