// saves the current configuration record as pretty JSON
// this is the "share" payload, the same flat record the configuration is stored as

use bevy::prelude::*;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use thiserror::Error;

use crate::systems::cabinet::engine::Configuration;
use crate::systems::cabinet::ConfigHistory;
use crate::systems::ui::ToastEvent;

// export event
#[derive(Event)]
pub struct ExportEvent {
    pub filename: String,
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to serialize configuration: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("failed to write export: {0}")]
    Io(#[from] std::io::Error),
}

pub fn export_configuration(config: &Configuration, path: impl AsRef<Path>) -> Result<(), ExportError> {
    let json = config.to_json_pretty()?;
    let mut writer = BufWriter::new(File::create(path)?);
    writer.write_all(json.as_bytes())?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

pub fn export_filename() -> String {
    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or_default();
    format!("wardrobe_{}.json", timestamp)
}

// handle export events
pub fn handle_export(
    mut events: EventReader<ExportEvent>,
    mut toasts: EventWriter<ToastEvent>,
    history: Res<ConfigHistory>,
) {
    for event in events.read() {
        match export_configuration(history.present(), &event.filename) {
            Ok(()) => {
                info!("exported configuration to {}", event.filename);
                toasts.write(ToastEvent(format!("Configuration saved to {}", event.filename)));
            }
            Err(e) => {
                error!("export failed: {}", e);
                toasts.write(ToastEvent("Export failed, see log".to_string()));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_readable_record() {
        let path = std::env::temp_dir().join(format!("wardrobe_export_{}.json", std::process::id()));
        let config = Configuration::default();
        export_configuration(&config, &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(Configuration::from_json(&text).unwrap(), config);
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn reports_unwritable_path() {
        let path = std::env::temp_dir().join("no_such_dir_for_wardrobe").join("out.json");
        assert!(matches!(
            export_configuration(&Configuration::default(), path),
            Err(ExportError::Io(_))
        ));
    }
}
