use mockall::mock;
use uuid::Uuid;
use wakesync_core::models::alarm::NewAlarm;

use crate::models::{DbAlarm, DbUser};

// Mock repositories for testing
mock! {
    pub AlarmRepo {
        pub async fn create_alarm(
            &self,
            new_alarm: NewAlarm,
        ) -> eyre::Result<DbAlarm>;

        pub async fn get_alarm_by_id(
            &self,
            id: Uuid,
            user_id: Uuid,
        ) -> eyre::Result<Option<DbAlarm>>;

        pub async fn list_alarms_by_user(
            &self,
            user_id: Uuid,
        ) -> eyre::Result<Vec<DbAlarm>>;

        pub async fn update_alarm(
            &self,
            id: Uuid,
            new_alarm: NewAlarm,
        ) -> eyre::Result<Option<DbAlarm>>;

        pub async fn set_alarm_active(
            &self,
            id: Uuid,
            user_id: Uuid,
            is_active: bool,
        ) -> eyre::Result<Option<DbAlarm>>;

        pub async fn delete_alarm(
            &self,
            id: Uuid,
            user_id: Uuid,
        ) -> eyre::Result<bool>;
    }
}

mock! {
    pub UserRepo {
        pub async fn create_user(
            &self,
            username: String,
            password_hash: String,
        ) -> eyre::Result<DbUser>;

        pub async fn get_user_by_username(
            &self,
            username: String,
        ) -> eyre::Result<Option<DbUser>>;

        pub async fn touch_last_login(
            &self,
            id: Uuid,
        ) -> eyre::Result<()>;

        pub async fn verify_credentials(
            &self,
            username: String,
            password: String,
        ) -> eyre::Result<Option<DbUser>>;
    }
}
