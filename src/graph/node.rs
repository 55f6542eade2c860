use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

/// A 2-D vector used for positions, velocities and forces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn length(self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn distance(self, other: Vec2) -> f64 {
        (self - other).length()
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Vec2 {
    type Output = Vec2;
    fn mul(self, rhs: f64) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl SubAssign for Vec2 {
    fn sub_assign(&mut self, rhs: Vec2) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

/// Classification tag of a screen, used to cluster nodes in the initial layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ScreenKind {
    Entry,
    Navigation,
    Content,
    Form,
    Feedback,
    Other,
}

impl ScreenKind {
    pub const ALL: [ScreenKind; 6] = [
        ScreenKind::Entry,
        ScreenKind::Navigation,
        ScreenKind::Content,
        ScreenKind::Form,
        ScreenKind::Feedback,
        ScreenKind::Other,
    ];

    /// Parses a classification hint. Unknown hints yield `None`.
    pub fn from_hint(hint: &str) -> Option<Self> {
        match hint.trim().to_ascii_lowercase().as_str() {
            "entry" | "welcome" | "splash" | "landing" | "login" | "auth" => Some(Self::Entry),
            "navigation" | "nav" | "menu" | "home" | "tabs" | "hub" => Some(Self::Navigation),
            "content" | "list" | "detail" | "feed" | "view" | "gallery" => Some(Self::Content),
            "form" | "input" | "edit" | "create" | "settings" => Some(Self::Form),
            "feedback" | "result" | "confirmation" | "success" | "error" | "dialog" => {
                Some(Self::Feedback)
            }
            "other" => Some(Self::Other),
            _ => None,
        }
    }

    /// Guesses a classification from a screen's display name.
    pub fn infer_from_name(name: &str) -> Self {
        const RULES: [(ScreenKind, &[&str]); 5] = [
            (
                ScreenKind::Entry,
                &["welcome", "login", "signin", "sign in", "splash", "landing", "start"],
            ),
            (ScreenKind::Navigation, &["menu", "home", "tab", "nav", "hub"]),
            (
                ScreenKind::Content,
                &["list", "detail", "feed", "view", "gallery", "chat", "inbox"],
            ),
            (
                ScreenKind::Form,
                &["add", "edit", "form", "create", "new", "settings", "compose"],
            ),
            (
                ScreenKind::Feedback,
                &["done", "success", "error", "confirm", "result", "thanks"],
            ),
        ];

        let lowered = name.to_ascii_lowercase();
        RULES
            .iter()
            .find(|(_, words)| words.iter().any(|w| lowered.contains(w)))
            .map(|(kind, _)| *kind)
            .unwrap_or(ScreenKind::Other)
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for ScreenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ScreenKind::Entry => "entry",
            ScreenKind::Navigation => "navigation",
            ScreenKind::Content => "content",
            ScreenKind::Form => "form",
            ScreenKind::Feedback => "feedback",
            ScreenKind::Other => "other",
        };
        f.write_str(name)
    }
}

/// A screen of the described application, placed on the diagram canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenNode {
    pub id: String,
    pub name: String,
    pub kind: ScreenKind,
    pub position: Vec2,
    pub velocity: Vec2,
    pub pinned: bool,
    /// Position of the originating screen record within the snapshot.
    pub record_index: usize,
    /// Action names declared on the screen record.
    pub actions: Vec<String>,
}

impl ScreenNode {
    pub fn new(id: &str, name: &str, kind: ScreenKind, record_index: usize) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            kind,
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            pinned: false,
            record_index,
            actions: Vec::new(),
        }
    }
}
