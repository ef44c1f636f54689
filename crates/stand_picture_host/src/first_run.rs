//! Variables and switches set at boot.
//!
//! "Always" settings are applied on every boot. "First run" settings are
//! applied only until the game's config file records that the initial setup
//! ran once.

use picture_layer_edit::parse_number_text;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::{CommandArgs, ConfigStore, HostError, PluginParameters, Result, SwitchStore, VariableStore};

pub const PLUGIN_NAME: &str = "FirstRunVariableHandler";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableSetting {
    #[serde(rename = "VariableId", default = "default_id", deserialize_with = "lenient_number")]
    pub variable_id: i32,
    #[serde(rename = "Value", default, deserialize_with = "lenient_number")]
    pub value: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwitchSetting {
    #[serde(rename = "SwitchId", default = "default_id", deserialize_with = "lenient_number")]
    pub switch_id: i32,
    #[serde(rename = "Value", default, deserialize_with = "switch_value")]
    pub value: bool,
}

fn default_id() -> i32 {
    1
}

/// Host `Number()`: anything that is not a number ends up as 0.
fn lenient_number<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<i32, D::Error> {
    let value = Value::deserialize(deserializer)?;
    let number = match &value {
        Value::String(text) => parse_number_text(text),
        Value::Number(number) => number.as_i64().and_then(|n| i32::try_from(n).ok()),
        Value::Null => Some(0),
        _ => None,
    };
    Ok(number.unwrap_or_else(|| {
        log::warn!("{PLUGIN_NAME}: '{value}' is not a number, using 0");
        0
    }))
}

/// On for `true` and `"true"`, off for everything else
fn switch_value<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<bool, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Bool(flag) => flag,
        Value::String(text) => text == "true",
        _ => false,
    })
}

/// What one boot applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BootReport {
    /// Settings from the always lists that were written
    pub always_applied: usize,
    /// Settings from the first run lists that were written, 0 when the
    /// initial setup had already run
    pub first_run_applied: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FirstRunCommand {
    ResetFirstRun,
}

impl FirstRunCommand {
    pub fn parse(command: &str, _args: &CommandArgs) -> Result<Self> {
        match command {
            "resetFirstRun" => Ok(FirstRunCommand::ResetFirstRun),
            _ => Err(HostError::UnknownCommand {
                plugin: PLUGIN_NAME,
                command: command.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FirstRunVariableHandler {
    first_run_variables: Vec<VariableSetting>,
    first_run_switches: Vec<SwitchSetting>,
    always_variables: Vec<VariableSetting>,
    always_switches: Vec<SwitchSetting>,
}

impl FirstRunVariableHandler {
    /// Reads the four settings lists. A malformed list is logged and treated
    /// as empty so the other lists still apply.
    pub fn from_parameters(params: &PluginParameters) -> Self {
        Self {
            first_run_variables: settings_list(params, "FirstRunVariableSettings"),
            first_run_switches: settings_list(params, "FirstRunSwitchSettings"),
            always_variables: settings_list(params, "AlwaysVariableSettings"),
            always_switches: settings_list(params, "AlwaysSwitchSettings"),
        }
    }

    pub fn first_run_variables(&self) -> &[VariableSetting] {
        &self.first_run_variables
    }

    pub fn first_run_switches(&self) -> &[SwitchSetting] {
        &self.first_run_switches
    }

    pub fn always_variables(&self) -> &[VariableSetting] {
        &self.always_variables
    }

    pub fn always_switches(&self) -> &[SwitchSetting] {
        &self.always_switches
    }

    /// Applies the settings for this boot and records the first run in the
    /// config. Fails only if the config cannot be saved.
    pub fn on_boot(&self, variables: &mut dyn VariableStore, switches: &mut dyn SwitchStore, config: &mut dyn ConfigStore) -> Result<BootReport> {
        let mut report = BootReport {
            always_applied: apply(&self.always_variables, &self.always_switches, variables, switches, "Always Enforce"),
            first_run_applied: 0,
        };

        if !config.has_run_initial_setup() {
            report.first_run_applied = apply(&self.first_run_variables, &self.first_run_switches, variables, switches, "First Run");
            config.set_has_run_initial_setup(true);
            config.save()?;
        }
        Ok(report)
    }

    pub fn execute(&self, command: FirstRunCommand, config: &mut dyn ConfigStore) -> Result<()> {
        match command {
            FirstRunCommand::ResetFirstRun => reset_first_run(config),
        }
    }
}

/// Clears the first run flag; the next boot applies the first run settings
/// again.
pub fn reset_first_run(config: &mut dyn ConfigStore) -> Result<()> {
    config.set_has_run_initial_setup(false);
    config.save()?;
    log::info!("{PLUGIN_NAME}: first run flag reset");
    Ok(())
}

fn settings_list<T: serde::de::DeserializeOwned>(params: &PluginParameters, name: &str) -> Vec<T> {
    params.struct_list(name).unwrap_or_else(|err| {
        log::error!("{PLUGIN_NAME}: error parsing {name}: {err}");
        Vec::new()
    })
}

fn apply(
    variable_settings: &[VariableSetting],
    switch_settings: &[SwitchSetting],
    variables: &mut dyn VariableStore,
    switches: &mut dyn SwitchStore,
    context: &str,
) -> usize {
    let mut applied = 0;
    for setting in variable_settings.iter().filter(|s| s.variable_id > 0) {
        variables.set_variable(setting.variable_id, setting.value);
        applied += 1;
    }
    for setting in switch_settings.iter().filter(|s| s.switch_id > 0) {
        switches.set_switch(setting.switch_id, setting.value);
        applied += 1;
    }
    if applied > 0 {
        log::info!("{PLUGIN_NAME}: {context} settings applied ({applied})");
    }
    applied
}
