//! Device adapter.

use crate::domain::identity::NumericUserId;
use crate::domain::records::iot::{DeviceStateUpdate, IoTCommand, IoTDevice};
use crate::domain::records::{OwnedDraft, Record};

define_adapter! {
    /// Smart-home device operations for one request.
    IoTAdapter
}

impl IoTAdapter {
    delegate_to_facade! {
        fn add_iot_device(&self, payload: &OwnedDraft<IoTDevice>) -> Record<IoTDevice>;
        fn get_user_iot_devices(&self, user_id: NumericUserId) -> Vec<Record<IoTDevice>>;
        /// Regular users only reach their own devices.
        fn get_iot_device_by_id(&self, device_id: &str) -> Option<Record<IoTDevice>>;
        fn update_iot_device_state(&self, device_id: &str, update: &DeviceStateUpdate) -> Option<Record<IoTDevice>>;
        fn delete_iot_device(&self, device_id: &str) -> ();
        fn save_iot_command(&self, payload: &OwnedDraft<IoTCommand>) -> Record<IoTCommand>;
        fn get_device_command_history(&self, device_id: &str, limit: Option<u32>) -> Vec<Record<IoTCommand>>;
    }
}
