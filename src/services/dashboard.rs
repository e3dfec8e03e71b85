use crate::{
    error::{ClientError, Result},
    models::{
        booking::{qr_file_name, Booking, BookingStatus},
        service::CovidRestrictions,
    },
    services::api::ApiClient,
    utils::resource::Resource,
};
use tracing::info;

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardData {
    pub bookings: Vec<Booking>,
    pub restrictions: CovidRestrictions,
    pub suggestions: Vec<String>,
}

impl DashboardData {
    pub fn pending_bookings(&self) -> usize {
        self.bookings.iter().filter(|b| b.status == BookingStatus::Pending).count()
    }
}

/// 下载用的二维码
#[derive(Debug, Clone)]
pub struct QrDownload {
    pub file_name: String,
    pub png: Vec<u8>,
}

/// 客户仪表盘
pub struct Dashboard {
    api: ApiClient,
    data: Resource<DashboardData>,
}

impl Dashboard {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            data: Resource::Pending,
        }
    }

    pub fn data(&self) -> &Resource<DashboardData> {
        &self.data
    }

    /// 三个请求并发发出，任何一个失败则整个仪表盘加载失败
    pub async fn load(&mut self) -> &Resource<DashboardData> {
        let api = &self.api;
        self.data = Resource::load(async {
            let (bookings, restrictions, suggestions) = tokio::try_join!(
                api.bookings(),
                api.covid_restrictions(),
                api.service_suggestions(),
            )?;
            Ok::<_, ClientError>(DashboardData {
                bookings,
                restrictions,
                suggestions: suggestions.suggestions,
            })
        })
        .await;
        &self.data
    }

    /// 永久删除账户及数据，随后登出
    pub async fn delete_account(&self) -> Result<String> {
        let response = self.api.delete_account().await?;
        self.api.session().logout();
        info!("Account deleted");
        Ok(response.message)
    }

    pub async fn booking_qr(&self, booking_id: &str) -> Result<QrDownload> {
        let png = self.api.booking_qr(booking_id).await?;
        Ok(QrDownload {
            file_name: qr_file_name(booking_id),
            png,
        })
    }
}
