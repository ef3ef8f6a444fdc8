//! Smart-home device operations.

use crate::domain::context::RequestContext;
use crate::domain::identity::NumericUserId;
use crate::domain::ports::IoTStore;
use crate::domain::records::iot::{DeviceStateUpdate, IoTCommand, IoTDevice};
use crate::domain::records::{OwnedDraft, Record};

use super::{RoutingFacade, RoutingResult};

impl RoutingFacade {
    /// Register a device.
    pub async fn add_iot_device(
        &self,
        ctx: &RequestContext,
        payload: &OwnedDraft<IoTDevice>,
    ) -> RoutingResult<Record<IoTDevice>> {
        route_owned!(self, ctx, "add_iot_device", payload.user_id,
            |store, access, owner| store.insert_device(access, owner, &payload.draft))
    }

    /// Devices for `user_id`, newest first.
    pub async fn get_user_iot_devices(
        &self,
        ctx: &RequestContext,
        user_id: NumericUserId,
    ) -> RoutingResult<Vec<Record<IoTDevice>>> {
        route_owned!(self, ctx, "get_user_iot_devices", user_id,
            |store, access, owner| store.list_devices(access, owner))
    }

    /// A device by external id, `None` when not visible.
    pub async fn get_iot_device_by_id(
        &self,
        ctx: &RequestContext,
        device_id: &str,
    ) -> RoutingResult<Option<Record<IoTDevice>>> {
        route_scoped!(self, ctx, "get_iot_device_by_id",
            |store, access| store.find_device(access, device_id))
    }

    /// Record a device's state report.
    pub async fn update_iot_device_state(
        &self,
        ctx: &RequestContext,
        device_id: &str,
        update: &DeviceStateUpdate,
    ) -> RoutingResult<Option<Record<IoTDevice>>> {
        route_scoped!(self, ctx, "update_iot_device_state",
            |store, access| store.update_device_state(access, device_id, update))
    }

    /// Remove a device.
    pub async fn delete_iot_device(&self, ctx: &RequestContext, device_id: &str) -> RoutingResult<()> {
        route_scoped!(self, ctx, "delete_iot_device",
            |store, access| store.delete_device(access, device_id))
    }

    /// Log a command sent to a device.
    pub async fn save_iot_command(
        &self,
        ctx: &RequestContext,
        payload: &OwnedDraft<IoTCommand>,
    ) -> RoutingResult<Record<IoTCommand>> {
        route_owned!(self, ctx, "save_iot_command", payload.user_id,
            |store, access, owner| store.insert_command(access, owner, &payload.draft))
    }

    /// Commands sent to a device, newest first.
    pub async fn get_device_command_history(
        &self,
        ctx: &RequestContext,
        device_id: &str,
        limit: Option<u32>,
    ) -> RoutingResult<Vec<Record<IoTCommand>>> {
        let limit = limit.unwrap_or(super::DEFAULT_HISTORY_LIMIT);
        route_scoped!(self, ctx, "get_device_command_history",
            |store, access| store.list_commands(access, device_id, limit))
    }
}
