//! Devices and their command log on the tenant store.

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::identity::SubjectId;
use crate::domain::ports::{IoTStore, Owned, StoreResult, TenantSession};
use crate::domain::records::iot::{DeviceStateUpdate, IoTCommand, IoTDevice};

use super::client::{PostgrestTenantStore, Query};
use super::dto::{DeviceStateChanges, InsertDto, IoTCommandColumns, IoTDeviceColumns, RowDto};
use super::tables::{IOT_COMMANDS, IOT_DEVICES};

type DeviceRow = RowDto<IoTDeviceColumns>;
type CommandRow = RowDto<IoTCommandColumns>;

fn device(session: &TenantSession, device_id: &str) -> Query {
    Query::new()
        .eq("device_id", device_id)
        .owned_by(session.subject())
}

#[async_trait]
impl IoTStore<TenantSession> for PostgrestTenantStore {
    async fn insert_device(
        &self,
        session: &TenantSession,
        owner: &SubjectId,
        device: &IoTDevice,
    ) -> StoreResult<Owned<IoTDevice, TenantSession>> {
        let body = InsertDto::<IoTDeviceColumns>::new(owner, device.clone());
        self.insert::<_, DeviceRow>(session, IOT_DEVICES, &body)
            .await?
            .into_record()
    }

    async fn list_devices(
        &self,
        session: &TenantSession,
        owner: &SubjectId,
    ) -> StoreResult<Vec<Owned<IoTDevice, TenantSession>>> {
        let query = Query::new().owned_by(owner).order("created_at.desc,id.desc");
        self.select::<DeviceRow>(session, IOT_DEVICES, &query)
            .await?
            .into_iter()
            .map(DeviceRow::into_record)
            .collect()
    }

    async fn find_device(
        &self,
        session: &TenantSession,
        device_id: &str,
    ) -> StoreResult<Option<Owned<IoTDevice, TenantSession>>> {
        self.select_one::<DeviceRow>(session, IOT_DEVICES, device(session, device_id))
            .await?
            .map(DeviceRow::into_record)
            .transpose()
    }

    async fn update_device_state(
        &self,
        session: &TenantSession,
        device_id: &str,
        update: &DeviceStateUpdate,
    ) -> StoreResult<Option<Owned<IoTDevice, TenantSession>>> {
        let changes = DeviceStateChanges::new(update, Utc::now());
        self.update::<_, DeviceRow>(session, IOT_DEVICES, &device(session, device_id), &changes)
            .await?
            .into_iter()
            .next()
            .map(DeviceRow::into_record)
            .transpose()
    }

    async fn delete_device(&self, session: &TenantSession, device_id: &str) -> StoreResult<()> {
        self.delete(session, IOT_DEVICES, &device(session, device_id))
            .await
    }

    async fn insert_command(
        &self,
        session: &TenantSession,
        owner: &SubjectId,
        command: &IoTCommand,
    ) -> StoreResult<Owned<IoTCommand, TenantSession>> {
        let body = InsertDto::<IoTCommandColumns>::new(owner, command.clone());
        self.insert::<_, CommandRow>(session, IOT_COMMANDS, &body)
            .await?
            .into_record()
    }

    async fn list_commands(
        &self,
        session: &TenantSession,
        device_id: &str,
        limit: u32,
    ) -> StoreResult<Vec<Owned<IoTCommand, TenantSession>>> {
        let query = device(session, device_id)
            .order("executed_at.desc,id.desc")
            .limit(limit);
        self.select::<CommandRow>(session, IOT_COMMANDS, &query)
            .await?
            .into_iter()
            .map(CommandRow::into_record)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::identity::{AccessToken, NumericUserId};
    use crate::domain::{Principal, RequestContext};
    use rstest::rstest;

    #[rstest]
    fn device_lookups_are_confined_to_the_caller() {
        let subject = SubjectId::new("user-42").expect("subject");
        let ctx = RequestContext::user(
            subject.clone(),
            NumericUserId::new(42).expect("id"),
            AccessToken::new("token-42").expect("token"),
        );
        let Principal::User(identity) = ctx.principal() else {
            panic!("expected a user context");
        };
        let session = TenantSession::for_identity(identity);

        assert_eq!(
            device(&session, "hue-1"),
            Query::new().eq("device_id", "hue-1").eq("user_id", &subject)
        );
    }
}
