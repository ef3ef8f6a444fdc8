//! Devices and their command log on the privileged store.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::identity::NumericUserId;
use crate::domain::ports::{IoTStore, Owned, PrivilegedAccess, StoreResult};
use crate::domain::records::iot::{DeviceStateUpdate, IoTCommand, IoTDevice};

use super::super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::super::models::{
    IoTCommandRow, IoTDeviceRow, IoTDeviceStateUpdate, NewIoTCommandRow, NewIoTDeviceRow,
};
use super::super::schema::{iot_command_history, iot_devices};
use super::{DieselPrivilegedStore, limit_param};

#[async_trait]
impl IoTStore<PrivilegedAccess> for DieselPrivilegedStore {
    async fn insert_device(
        &self,
        _access: &PrivilegedAccess,
        owner: &NumericUserId,
        device: &IoTDevice,
    ) -> StoreResult<Owned<IoTDevice, PrivilegedAccess>> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(iot_devices::table)
            .values(&NewIoTDeviceRow::new(*owner, device))
            .returning(IoTDeviceRow::as_returning())
            .get_result::<IoTDeviceRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?
            .into_record()
    }

    async fn list_devices(
        &self,
        _access: &PrivilegedAccess,
        owner: &NumericUserId,
    ) -> StoreResult<Vec<Owned<IoTDevice, PrivilegedAccess>>> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        iot_devices::table
            .filter(iot_devices::user_id.eq(owner.get()))
            .order((iot_devices::created_at.desc(), iot_devices::id.desc()))
            .select(IoTDeviceRow::as_select())
            .load::<IoTDeviceRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?
            .into_iter()
            .map(IoTDeviceRow::into_record)
            .collect()
    }

    async fn find_device(
        &self,
        _access: &PrivilegedAccess,
        device_id: &str,
    ) -> StoreResult<Option<Owned<IoTDevice, PrivilegedAccess>>> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        iot_devices::table
            .filter(iot_devices::device_id.eq(device_id))
            .select(IoTDeviceRow::as_select())
            .first::<IoTDeviceRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .map(IoTDeviceRow::into_record)
            .transpose()
    }

    async fn update_device_state(
        &self,
        _access: &PrivilegedAccess,
        device_id: &str,
        update: &DeviceStateUpdate,
    ) -> StoreResult<Option<Owned<IoTDevice, PrivilegedAccess>>> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::update(iot_devices::table.filter(iot_devices::device_id.eq(device_id)))
            .set(&IoTDeviceStateUpdate::new(update, Utc::now()))
            .returning(IoTDeviceRow::as_returning())
            .get_result::<IoTDeviceRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .map(IoTDeviceRow::into_record)
            .transpose()
    }

    async fn delete_device(&self, _access: &PrivilegedAccess, device_id: &str) -> StoreResult<()> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::delete(iot_devices::table.filter(iot_devices::device_id.eq(device_id)))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn insert_command(
        &self,
        _access: &PrivilegedAccess,
        owner: &NumericUserId,
        command: &IoTCommand,
    ) -> StoreResult<Owned<IoTCommand, PrivilegedAccess>> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(iot_command_history::table)
            .values(&NewIoTCommandRow::new(*owner, command))
            .returning(IoTCommandRow::as_returning())
            .get_result::<IoTCommandRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?
            .into_record()
    }

    async fn list_commands(
        &self,
        _access: &PrivilegedAccess,
        device_id: &str,
        limit: u32,
    ) -> StoreResult<Vec<Owned<IoTCommand, PrivilegedAccess>>> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        iot_command_history::table
            .filter(iot_command_history::device_id.eq(device_id))
            .order((
                iot_command_history::executed_at.desc(),
                iot_command_history::id.desc(),
            ))
            .limit(limit_param(limit))
            .select(IoTCommandRow::as_select())
            .load::<IoTCommandRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?
            .into_iter()
            .map(IoTCommandRow::into_record)
            .collect()
    }
}
