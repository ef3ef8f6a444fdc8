//! Port for smart-home devices and their command log.

use async_trait::async_trait;

use crate::domain::records::iot::{DeviceStateUpdate, IoTCommand, IoTDevice};

use super::{AccessScope, Owned, StoreResult};

/// Device persistence for one access scope.
///
/// Devices are addressed by their external id. Under a tenant scope every
/// by-id call only reaches the caller's own devices.
#[async_trait]
pub trait IoTStore<S: AccessScope>: Send + Sync {
    /// Register a device owned by `owner`.
    async fn insert_device(
        &self,
        access: &S,
        owner: &S::Owner,
        device: &IoTDevice,
    ) -> StoreResult<Owned<IoTDevice, S>>;

    /// Devices owned by `owner`, newest first.
    async fn list_devices(
        &self,
        access: &S,
        owner: &S::Owner,
    ) -> StoreResult<Vec<Owned<IoTDevice, S>>>;

    /// The device with external id `device_id`, `None` when not visible.
    async fn find_device(
        &self,
        access: &S,
        device_id: &str,
    ) -> StoreResult<Option<Owned<IoTDevice, S>>>;

    /// Record a state report and stamp the device as seen now. `None` when
    /// the device is not visible.
    async fn update_device_state(
        &self,
        access: &S,
        device_id: &str,
        update: &DeviceStateUpdate,
    ) -> StoreResult<Option<Owned<IoTDevice, S>>>;

    /// Remove a device.
    async fn delete_device(&self, access: &S, device_id: &str) -> StoreResult<()>;

    /// Log a command sent on behalf of `owner`.
    async fn insert_command(
        &self,
        access: &S,
        owner: &S::Owner,
        command: &IoTCommand,
    ) -> StoreResult<Owned<IoTCommand, S>>;

    /// Up to `limit` commands sent to `device_id`, newest first.
    async fn list_commands(
        &self,
        access: &S,
        device_id: &str,
        limit: u32,
    ) -> StoreResult<Vec<Owned<IoTCommand, S>>>;
}
