//! Smart-home devices and the commands sent to them.
//!
//! Devices are addressed by their external `deviceId`, the identifier the
//! hardware reports, not by the store's row id.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Room a device lands in when none is given.
pub const DEFAULT_ROOM: &str = "Uncategorized";

string_enum! {
    /// Kind of hardware.
    pub enum DeviceType ("device type") {
        Light => "light",
        Thermostat => "thermostat",
        Plug => "plug",
        Switch => "switch",
        Sensor => "sensor",
        Lock => "lock",
        Camera => "camera",
        Speaker => "speaker",
        Other => "other",
    }
}

string_enum! {
    /// Reachability last reported for a device.
    pub enum DeviceStatus ("device status") {
        Online => "online",
        Offline => "offline",
        Error => "error",
    }
}

string_enum! {
    /// Transport used to reach a device.
    pub enum ConnectionType ("connection type") {
        Mqtt => "mqtt",
        Http => "http",
        Websocket => "websocket",
        Local => "local",
    }
}

string_enum! {
    /// Outcome of a device command.
    pub enum CommandStatus ("command status") {
        Success => "success",
        Failed => "failed",
        Pending => "pending",
    }
}

fn default_room() -> String {
    DEFAULT_ROOM.to_owned()
}

const fn default_device_status() -> DeviceStatus {
    DeviceStatus::Offline
}

const fn default_command_status() -> CommandStatus {
    CommandStatus::Pending
}

/// A registered smart-home device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IoTDevice {
    /// External identifier; unique across all users.
    pub device_id: String,
    /// Display name.
    pub device_name: String,
    /// Kind of hardware.
    pub device_type: DeviceType,
    /// Room the device sits in.
    #[serde(default = "default_room")]
    pub room: String,
    /// Vendor, when known.
    #[serde(default)]
    pub manufacturer: Option<String>,
    /// Vendor model, when known.
    #[serde(default)]
    pub model: Option<String>,
    /// Last reported reachability.
    #[serde(default = "default_device_status")]
    pub status: DeviceStatus,
    /// Opaque JSON state blob as reported by the device.
    #[serde(default)]
    pub state: Option<String>,
    /// Opaque JSON list of supported capabilities.
    #[serde(default)]
    pub capabilities: Option<String>,
    /// Transport used to reach the device.
    pub connection_type: ConnectionType,
    /// Opaque JSON transport settings.
    #[serde(default)]
    pub connection_config: Option<String>,
    /// When the device last reported in.
    #[serde(default)]
    pub last_seen: Option<DateTime<Utc>>,
}

/// A state report from a device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceStateUpdate {
    /// New state blob.
    pub state: String,
    /// Reachability to record alongside it.
    #[serde(default = "DeviceStateUpdate::default_status")]
    pub status: DeviceStatus,
}

impl DeviceStateUpdate {
    /// A report from a device that is evidently online.
    #[must_use]
    pub fn online(state: impl Into<String>) -> Self {
        Self {
            state: state.into(),
            status: DeviceStatus::Online,
        }
    }

    const fn default_status() -> DeviceStatus {
        DeviceStatus::Online
    }

    /// Apply the report to an in-memory device seen at `now`.
    pub fn apply(&self, device: &mut IoTDevice, now: DateTime<Utc>) {
        device.state = Some(self.state.clone());
        device.status = self.status;
        device.last_seen = Some(now);
    }
}

/// One command sent to a device.
///
/// The envelope's creation timestamp is the execution time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IoTCommand {
    /// External identifier of the target device.
    pub device_id: String,
    /// Command name, e.g. `turn_on`.
    pub command: String,
    /// Opaque JSON arguments.
    #[serde(default)]
    pub parameters: Option<String>,
    /// Outcome so far.
    #[serde(default = "default_command_status")]
    pub status: CommandStatus,
    /// Failure detail when `status` is `failed`.
    #[serde(default)]
    pub error_message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn devices_default_to_an_offline_uncategorised_state() {
        let device: IoTDevice = serde_json::from_value(json!({
            "deviceId": "hue-1",
            "deviceName": "Desk lamp",
            "deviceType": "light",
            "connectionType": "mqtt",
        }))
        .expect("deserialise");

        assert_eq!(device.room, DEFAULT_ROOM);
        assert_eq!(device.status, DeviceStatus::Offline);
        assert_eq!(device.last_seen, None);
    }

    #[rstest]
    fn state_reports_bring_the_device_online() {
        let mut device: IoTDevice = serde_json::from_value(json!({
            "deviceId": "plug-3",
            "deviceName": "Kettle",
            "deviceType": "plug",
            "connectionType": "http",
        }))
        .expect("deserialise");
        let now = DateTime::<Utc>::from_timestamp(1_700_000_000, 0).unwrap_or_default();

        DeviceStateUpdate::online(r#"{"on":true}"#).apply(&mut device, now);

        assert_eq!(device.status, DeviceStatus::Online);
        assert_eq!(device.state.as_deref(), Some(r#"{"on":true}"#));
        assert_eq!(device.last_seen, Some(now));
    }

    #[rstest]
    fn state_reports_default_to_online() {
        let update: DeviceStateUpdate =
            serde_json::from_value(json!({ "state": "{}" })).expect("deserialise");
        assert_eq!(update.status, DeviceStatus::Online);
    }

    #[rstest]
    fn commands_start_pending() {
        let command: IoTCommand =
            serde_json::from_value(json!({ "deviceId": "lock-1", "command": "lock" }))
                .expect("deserialise");
        assert_eq!(command.status, CommandStatus::Pending);
    }
}
