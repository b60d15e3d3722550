use color_eyre::eyre::eyre;
use color_eyre::Result;
use plexkit_api::{Client, NavigationCommand, PlaybackCommand};
use tracing::debug;

use super::{connect, Settings};
use crate::output::Output;

/// Arguments of `plexkit control`.
pub struct ControlArgs {
    pub client: String,
    pub command: String,
    pub level: Option<u8>,
    pub rating_key: Option<u64>,
    pub offset: Option<i64>,
}

/// A parsed player command.
#[derive(Debug, PartialEq)]
enum PlayerCommand {
    Navigation(NavigationCommand),
    Playback(PlaybackCommand),
    SetVolume(u8),
    PlayMedia { rating_key: u64, offset: Option<i64> },
}

impl PlayerCommand {
    fn parse(args: &ControlArgs) -> Result<Self> {
        if let Ok(command) = args.command.parse::<NavigationCommand>() {
            return Ok(Self::Navigation(command));
        }
        if let Ok(command) = args.command.parse::<PlaybackCommand>() {
            return Ok(Self::Playback(command));
        }
        match args.command.to_ascii_lowercase().as_str() {
            "setvolume" => {
                let level = args.level.ok_or_else(|| eyre!("setVolume needs --level"))?;
                Ok(Self::SetVolume(level))
            }
            "playmedia" => {
                let rating_key = args
                    .rating_key
                    .ok_or_else(|| eyre!("playMedia needs --rating-key"))?;
                Ok(Self::PlayMedia { rating_key, offset: args.offset })
            }
            _ => Err(eyre!(
                "Unknown command '{}'. Navigation: {}. Playback: {}. Application: setVolume, playMedia.",
                args.command,
                join(NavigationCommand::ALL.iter()),
                join(PlaybackCommand::ALL.iter())
            )),
        }
    }
}

fn join<T: ToString>(items: impl Iterator<Item = T>) -> String {
    items.map(|item| item.to_string()).collect::<Vec<_>>().join(", ")
}

pub fn run_clients(settings: &Settings, server: Option<&str>, output: &Output) -> Result<()> {
    let (_, server) = connect(settings, server)?;
    let clients = server.clients()?;

    if !output.is_human() {
        output.json(&serde_json::to_value(&clients)?);
        return Ok(());
    }
    if clients.is_empty() {
        output.warn(format!("No players reported by {}", server.name()));
        return Ok(());
    }

    let rows = clients.iter().map(client_row).collect();
    output.table(
        &format!("Players on {}", server.name()),
        &["Name", "Address", "Port", "Machine", "Version"],
        rows,
    );
    Ok(())
}

fn client_row(client: &Client) -> Vec<String> {
    vec![
        client.name().to_string(),
        client.address().to_string(),
        client.port().to_string(),
        client.machine_identifier().unwrap_or("").to_string(),
        client.version().unwrap_or("").to_string(),
    ]
}

pub fn run_control(settings: &Settings, server: Option<&str>, args: ControlArgs, output: &Output) -> Result<()> {
    let command = PlayerCommand::parse(&args)?;

    let (mut registry, server) = connect(settings, server)?;
    let discovered = registry.discover_clients()?;
    debug!("{} player(s) discovered", discovered);
    let client = registry.client(&args.client)?;

    match command {
        PlayerCommand::Navigation(command) => client.navigation().send(command)?,
        PlayerCommand::Playback(command) => client.playback().send(command)?,
        PlayerCommand::SetVolume(level) => client.application().set_volume(level)?,
        PlayerCommand::PlayMedia { rating_key, offset } => {
            let item = server.library().metadata_item(rating_key)?;
            client.application().play_media(&item, offset)?;
        }
    }

    output.success(format!("Sent {} to {}", args.command, client.name()));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(command: &str) -> ControlArgs {
        ControlArgs {
            client: "Living Room".to_string(),
            command: command.to_string(),
            level: None,
            rating_key: None,
            offset: None,
        }
    }

    #[test]
    fn test_parse_navigation_and_playback() {
        assert_eq!(
            PlayerCommand::parse(&args("moveUp")).unwrap(),
            PlayerCommand::Navigation(NavigationCommand::MoveUp)
        );
        assert_eq!(
            PlayerCommand::parse(&args("PAUSE")).unwrap(),
            PlayerCommand::Playback(PlaybackCommand::Pause)
        );
        assert_eq!(
            PlayerCommand::parse(&args("rewind")).unwrap(),
            PlayerCommand::Playback(PlaybackCommand::Rewind)
        );
    }

    #[test]
    fn test_parse_application_commands_need_arguments() {
        assert!(PlayerCommand::parse(&args("setVolume")).is_err());
        assert!(PlayerCommand::parse(&args("playMedia")).is_err());

        let mut volume = args("setVolume");
        volume.level = Some(40);
        assert_eq!(PlayerCommand::parse(&volume).unwrap(), PlayerCommand::SetVolume(40));

        let mut play = args("playMedia");
        play.rating_key = Some(42);
        play.offset = Some(1000);
        assert_eq!(
            PlayerCommand::parse(&play).unwrap(),
            PlayerCommand::PlayMedia { rating_key: 42, offset: Some(1000) }
        );
    }

    #[test]
    fn test_parse_unknown_lists_commands() {
        let err = PlayerCommand::parse(&args("eject")).unwrap_err().to_string();
        assert!(err.contains("'eject'"));
        assert!(err.contains("moveUp"));
        assert!(err.contains("skipNext"));
    }
}
