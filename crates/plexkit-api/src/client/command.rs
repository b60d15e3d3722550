use std::fmt;
use std::str::FromStr;

/// Generates a command enum with its wire names.
macro_rules! commands {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $wire:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = String;

            /// Accepts the wire name in any case.
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $name::ALL
                    .iter()
                    .find(|command| command.as_str().eq_ignore_ascii_case(s.trim()))
                    .copied()
                    .ok_or_else(|| format!("unknown {} command: {}", stringify!($name), s))
            }
        }
    };
}

commands! {
    /// Menu navigation on a player.
    NavigationCommand {
        MoveUp => "moveUp",
        MoveDown => "moveDown",
        MoveLeft => "moveLeft",
        MoveRight => "moveRight",
        PageUp => "pageUp",
        PageDown => "pageDown",
        NextLetter => "nextLetter",
        PreviousLetter => "previousLetter",
        Select => "select",
        Back => "back",
        ContextMenu => "contextMenu",
        ToggleOsd => "toggleOSD",
    }
}

commands! {
    /// Transport controls for whatever the player is playing.
    PlaybackCommand {
        Play => "play",
        Pause => "pause",
        Stop => "stop",
        Rewind => "rewind",
        FastForward => "fastForward",
        StepForward => "stepForward",
        BigStepForward => "bigStepForward",
        StepBack => "stepBack",
        BigStepBack => "bigStepBack",
        SkipNext => "skipNext",
        SkipPrevious => "skipPrevious",
    }
}
