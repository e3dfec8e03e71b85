use crate::{
    error::{ClientError, Result},
    models::{
        booking::{Booking, BookingForm, CreateBookingRequest},
        service::Service,
    },
    services::api::ApiClient,
    utils::{resource::Resource, validation::validate_preferred_date},
};
use chrono::Local;
use tracing::info;

/// 服务目录页及其预约对话框
pub struct Catalog {
    api: ApiClient,
    services: Resource<Vec<Service>>,
    selected: Option<Service>,
}

impl Catalog {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            services: Resource::Pending,
            selected: None,
        }
    }

    pub fn services(&self) -> &Resource<Vec<Service>> {
        &self.services
    }

    pub async fn load(&mut self) -> &Resource<Vec<Service>> {
        self.services = Resource::load(self.api.services()).await;
        &self.services
    }

    /// 打开预约对话框
    pub fn open_booking(&mut self, service_id: &str) -> Option<&Service> {
        self.selected = self
            .services
            .ready()
            .and_then(|list| list.iter().find(|s| s.id == service_id))
            .cloned();
        self.selected.as_ref()
    }

    pub fn close_booking(&mut self) {
        self.selected = None;
    }

    pub fn selected(&self) -> Option<&Service> {
        self.selected.as_ref()
    }

    /// 提交预约；成功后关闭对话框，失败时保持打开
    pub async fn book(&mut self, form: BookingForm) -> Result<Booking> {
        let service = self
            .selected
            .as_ref()
            .ok_or_else(|| ClientError::validation("No service selected"))?;

        form.check()?;
        validate_preferred_date(&form.preferred_date, Local::now().naive_local())?;

        let request = CreateBookingRequest::for_service(service, form);
        let booking = self.api.create_booking(&request).await?;
        info!("Booking {} submitted for {}", booking.id, booking.service_type);

        self.selected = None;
        Ok(booking)
    }
}
