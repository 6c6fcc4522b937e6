//! Named asset kinds and the catalog contract a front end fulfils.
//!
//! The core only ever deals in kinds. Turning a kind into pixels is the
//! catalog's job, and a catalog is free to have no pixels at all for a kind:
//! painters draw a placeholder in that case.

use std::fmt;

/// Appearance selector of a figure. Indexes into its [`FrameSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum FigureState {
    #[default]
    Still,
    Left,
    Right,
    Action1,
    Action2,
}

impl FigureState {
    pub const ALL: [FigureState; 5] = [
        FigureState::Still,
        FigureState::Left,
        FigureState::Right,
        FigureState::Action1,
        FigureState::Action2,
    ];

    /// Accepts a keyword or its index `0..=4`; anything else is `still`.
    pub fn from_token(token: &str) -> Self {
        let token = token.to_lowercase();
        if let Ok(idx) = token.parse::<usize>() {
            return Self::ALL.get(idx).copied().unwrap_or_default();
        }
        match token.as_str() {
            "left" => FigureState::Left,
            "right" => FigureState::Right,
            "action1" => FigureState::Action1,
            "action2" => FigureState::Action2,
            _ => FigureState::Still,
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

macro_rules! named_kind {
    (
        $(#[$meta:meta])*
        $name:ident, fallback = $fallback:ident, { $($variant:ident => ($key:literal, $folder:literal)),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Case-insensitive lookup by name.
            pub fn from_name(name: &str) -> Option<Self> {
                let name = name.to_lowercase();
                match name.as_str() {
                    $($key => Some($name::$variant),)+
                    _ => None,
                }
            }

            /// Like [`Self::from_name`], falling back to the default kind.
            pub fn resolve(name: &str) -> Self {
                Self::from_name(name).unwrap_or_else(|| {
                    log::debug!("unknown {} `{}`, using `{}`", stringify!($name), name, $name::$fallback);
                    $name::$fallback
                })
            }

            pub fn name(self) -> &'static str {
                match self {
                    $($name::$variant => $key,)+
                }
            }

            /// Asset folder, relative to the asset root.
            pub fn folder(self) -> &'static str {
                match self {
                    $($name::$variant => $folder,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }
    };
}

named_kind! {
    /// Character art set.
    FigureKind, fallback = Mob, {
        Enemy => ("enemy", "char_evil"),
        Mob => ("mob", "char_evil"),
        Jason => ("jason", "char_main"),
        Paul => ("paul", "char_main"),
        Rick => ("rick", "char_main"),
        Sam => ("sam", "char_main"),
        Shin => ("shin", "char_main"),
        Heather => ("heather", "char_side"),
    }
}

named_kind! {
    /// Full-canvas backdrop.
    BackgroundKind, fallback = Title, {
        Ambulance1 => ("ambulance1", "backgrounds"),
        Ambulance2 => ("ambulance2", "backgrounds"),
        Ambulance3 => ("ambulance3", "backgrounds"),
        Boat1 => ("boat1", "backgrounds"),
        Building1 => ("building1", "backgrounds"),
        Building2 => ("building2", "backgrounds"),
        City1 => ("city1", "backgrounds"),
        City2 => ("city2", "backgrounds"),
        Office1 => ("office1", "backgrounds"),
        Office2 => ("office2", "backgrounds"),
        Title => ("title", "backgrounds"),
    }
}

named_kind! {
    /// Prop art set.
    ObjectKind, fallback = Bullet, {
        Bullet => ("bullet", "objects"),
    }
}

/// Up to five frames indexed by [`FigureState`]. Missing slots show frame 0.
#[derive(Debug, Clone)]
pub struct FrameSet<B> {
    frames: Vec<B>,
}

impl<B> FrameSet<B> {
    pub const SLOTS: usize = 5;

    /// Keeps at most [`Self::SLOTS`] frames. Returns `None` without any.
    pub fn new(mut frames: Vec<B>) -> Option<Self> {
        if frames.is_empty() {
            return None;
        }
        frames.truncate(Self::SLOTS);
        Some(Self { frames })
    }

    pub fn frame(&self, state: FigureState) -> &B {
        self.frames.get(state.index()).unwrap_or(&self.frames[0])
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

/// Resolves kinds to bitmaps. `None` means the art is missing.
pub trait AssetCatalog {
    type Bitmap;

    fn figure(&self, kind: FigureKind) -> Option<&FrameSet<Self::Bitmap>>;

    fn background(&self, kind: BackgroundKind) -> Option<&Self::Bitmap>;

    fn object(&self, kind: ObjectKind) -> Option<&FrameSet<Self::Bitmap>>;

    /// Frame for a figure in a given state.
    fn figure_frame(&self, kind: FigureKind, state: FigureState) -> Option<&Self::Bitmap> {
        self.figure(kind).map(|set| set.frame(state))
    }
}
