use log::{debug, error, info, warn};
use std::{fs, io::ErrorKind, time::Duration};
use tether_agent::{PlugDefinition, TetherAgent};

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};

use crate::{
    error::ConfigError,
    systems::{
        dispatch::{DispatchSettings, DEFAULT_DRAG_SCALE},
        gesture::{DEPTH_THRESH_ONE, DEPTH_THRESH_TWO},
    },
};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct BackendConfig {
    // -------- GESTURE SETTINGS
    /// Depth difference (head minus hand, raw sensor units) for a single raised hand
    pub depth_thresh_one: i32,

    /// Summed depth difference of both hands for a two-hand gesture; must be
    /// larger than depthThreshOne
    pub depth_thresh_two: i32,

    // -------- ACTION SETTINGS
    /// Screen pixels per depth-image pixel of hand movement while dragging
    pub drag_scale: i32,

    /// Extra time (ms) to ignore frames after a left-hand gesture starts, on top
    /// of the fixed 20ms
    pub settle_delay_offset_ms: u64,

    /// Screen size for the Tether actuator's virtual pointer; native actuators
    /// ask the OS instead
    pub screen_width: i32,
    pub screen_height: i32,

    // -------- CAMERA SETTINGS
    /// Tilt (degrees) requested when the agent starts
    pub initial_elevation: i32,

    /// Degrees per elevation up/down request
    pub elevation_step: i32,
}

impl Default for BackendConfig {
    fn default() -> Self {
        BackendConfig {
            depth_thresh_one: DEPTH_THRESH_ONE,
            depth_thresh_two: DEPTH_THRESH_TWO,
            drag_scale: DEFAULT_DRAG_SCALE,
            settle_delay_offset_ms: 0,
            screen_width: 1920,
            screen_height: 1080,
            initial_elevation: 10,
            elevation_step: 10,
        }
    }
}

impl BackendConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.depth_thresh_two <= self.depth_thresh_one {
            return Err(ConfigError::ThresholdOrder {
                one: self.depth_thresh_one,
                two: self.depth_thresh_two,
            });
        }
        if self.drag_scale == 0 {
            return Err(ConfigError::ZeroDragScale);
        }
        if self.elevation_step <= 0 {
            return Err(ConfigError::ElevationStep(self.elevation_step));
        }
        Ok(())
    }

    pub fn dispatch_settings(&self) -> DispatchSettings {
        DispatchSettings {
            drag_scale: self.drag_scale,
            settle_delay_offset: Duration::from_millis(self.settle_delay_offset_ms),
        }
    }

    pub fn screen_size(&self) -> (i32, i32) {
        (self.screen_width, self.screen_height)
    }

    /// Replaces this config only if the incoming one decodes and validates
    pub fn parse_remote_config(&mut self, payload: &[u8]) -> Result<()> {
        let config = rmp_serde::from_slice::<BackendConfig>(payload)
            .map_err(|e| anyhow!("Failed to parse Config from message: {}", e))?;
        config.validate()?;
        *self = config;
        Ok(())
    }

    pub fn write_config_to_file(&self, config_file_path: &str) -> Result<()> {
        debug!("Current state of config: {:?}", self);
        let text = serde_json::to_string_pretty(self)?;
        match fs::write(config_file_path, text) {
            Ok(()) => {
                info!("Wrote config to file: {:?}", config_file_path);
                Ok(())
            }
            Err(e) => {
                error!("Error writing config to file: {:?}", e);
                Err(e.into())
            }
        }
    }

    pub fn handle_save_message(
        &mut self,
        tether_agent: &TetherAgent,
        config_output: &PlugDefinition,
        payload: &[u8],
        config_file_path: &str,
    ) -> Result<()> {
        match self.parse_remote_config(payload) {
            Ok(()) => {
                info!("Remote-provided config parsed OK; now save to disk and (re) publish");
                self.save_and_republish(tether_agent, config_output, config_file_path)
            }
            Err(e) => Err(anyhow!("Handle save-message failure: {e}")),
        }
    }

    pub fn save_and_republish(
        &self,
        tether_agent: &TetherAgent,
        config_output: &PlugDefinition,
        config_file_path: &str,
    ) -> Result<()> {
        info!("Saving config to disk and re-publishing via Tether...");
        self.write_config_to_file(config_file_path)?;
        tether_agent
            .encode_and_publish(config_output, self)
            .context("failed to publish config")
    }
}

pub fn load_config_from_file(config_file_path: &str) -> Result<BackendConfig> {
    match fs::read_to_string(config_file_path) {
        Err(e) if e.kind() == ErrorKind::NotFound => {
            warn!(
                "Gesture Config file not found, will use defaults and create one at {}",
                config_file_path
            );
            let config = BackendConfig::default();
            config.write_config_to_file(config_file_path)?;
            Ok(config)
        }
        Err(e) => Err(anyhow!(
            "Failed to load Gesture Config from disk; error: {:?}",
            e
        )),
        Ok(s) => {
            info!("Loaded Gesture config OK from \"{}\"", config_file_path);
            let loaded_config = serde_json::from_str::<BackendConfig>(&s)
                .map_err(|e| anyhow!("Failed to parse config data: {}", e))?;
            debug!("Config parsed data from file: {:?}", &loaded_config);
            loaded_config.validate()?;
            Ok(loaded_config)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = BackendConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.depth_thresh_one, 3000);
        assert_eq!(config.depth_thresh_two, 6000);
        assert_eq!(config.dispatch_settings().drag_scale, 8);
    }

    #[test]
    fn thresholds_must_be_ordered() {
        let config = BackendConfig {
            depth_thresh_one: 6000,
            depth_thresh_two: 6000,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::ThresholdOrder {
                one: 6000,
                two: 6000
            })
        );
    }

    #[test]
    fn partial_json_fills_in_defaults() {
        let config: BackendConfig =
            serde_json::from_str(r#"{ "depthThreshOne": 2500, "settleDelayOffsetMs": 80 }"#)
                .unwrap();
        assert_eq!(config.depth_thresh_one, 2500);
        assert_eq!(config.depth_thresh_two, 6000);
        assert_eq!(
            config.dispatch_settings().settle_delay_offset,
            Duration::from_millis(80)
        );
    }

    #[test]
    fn invalid_remote_config_keeps_previous() {
        let mut config = BackendConfig::default();
        let bad = BackendConfig {
            drag_scale: 0,
            ..Default::default()
        };
        let payload = rmp_serde::to_vec_named(&bad).unwrap();
        assert!(config.parse_remote_config(&payload).is_err());
        assert_eq!(config, BackendConfig::default());

        let good = BackendConfig {
            drag_scale: 4,
            ..Default::default()
        };
        let payload = rmp_serde::to_vec_named(&good).unwrap();
        config.parse_remote_config(&payload).unwrap();
        assert_eq!(config.drag_scale, 4);
    }

    #[test]
    fn missing_file_creates_defaults() {
        let path = std::env::temp_dir().join(format!(
            "gesture-config-test-{}.json",
            std::process::id()
        ));
        let path = path.to_str().unwrap();
        let _ = fs::remove_file(path);

        let config = load_config_from_file(path).unwrap();
        assert_eq!(config, BackendConfig::default());
        assert_eq!(load_config_from_file(path).unwrap(), config);

        let _ = fs::remove_file(path);
    }
}
