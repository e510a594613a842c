use terralux_api::{ConnectionParameters, DayMeasurements, DeviceStatus};

type Handler = Box<dyn FnMut() + Send>;
type Listener<T> = Box<dyn FnMut(&T) + Send>;

/// UI hooks fired by the [`Controller`](crate::Controller).
///
/// At most one handler per event; an unset handler is skipped.
#[derive(Default)]
pub struct Callbacks {
    before_connect: Option<Handler>,
    connected: Option<Handler>,
    timeout: Option<Handler>,
    error: Option<Handler>,
    disconnected: Option<Handler>,
    connection_parameters: Option<Listener<ConnectionParameters>>,
    status: Option<Listener<DeviceStatus>>,
    day_measurements: Option<Listener<DayMeasurements>>,
}

impl Callbacks {
    pub fn on_before_connect(mut self, handler: impl FnMut() + Send + 'static) -> Self {
        self.before_connect = Some(Box::new(handler));
        self
    }

    pub fn on_connected(mut self, handler: impl FnMut() + Send + 'static) -> Self {
        self.connected = Some(Box::new(handler));
        self
    }

    /// Fired in place of `on_before_connect` once the retry limit was exceeded.
    pub fn on_timeout(mut self, handler: impl FnMut() + Send + 'static) -> Self {
        self.timeout = Some(Box::new(handler));
        self
    }

    pub fn on_error(mut self, handler: impl FnMut() + Send + 'static) -> Self {
        self.error = Some(Box::new(handler));
        self
    }

    pub fn on_disconnected(mut self, handler: impl FnMut() + Send + 'static) -> Self {
        self.disconnected = Some(Box::new(handler));
        self
    }

    pub fn on_connection_parameters(
        mut self,
        listener: impl FnMut(&ConnectionParameters) + Send + 'static,
    ) -> Self {
        self.connection_parameters = Some(Box::new(listener));
        self
    }

    pub fn on_status(mut self, listener: impl FnMut(&DeviceStatus) + Send + 'static) -> Self {
        self.status = Some(Box::new(listener));
        self
    }

    pub fn on_day_measurements(
        mut self,
        listener: impl FnMut(&DayMeasurements) + Send + 'static,
    ) -> Self {
        self.day_measurements = Some(Box::new(listener));
        self
    }

    pub(crate) fn before_connect(&mut self) {
        fire(&mut self.before_connect)
    }

    pub(crate) fn connected(&mut self) {
        fire(&mut self.connected)
    }

    pub(crate) fn timeout(&mut self) {
        fire(&mut self.timeout)
    }

    pub(crate) fn error(&mut self) {
        fire(&mut self.error)
    }

    pub(crate) fn disconnected(&mut self) {
        fire(&mut self.disconnected)
    }

    pub(crate) fn connection_parameters(&mut self, params: &ConnectionParameters) {
        notify(&mut self.connection_parameters, params)
    }

    pub(crate) fn status(&mut self, status: &DeviceStatus) {
        notify(&mut self.status, status)
    }

    pub(crate) fn day_measurements(&mut self, measurements: &DayMeasurements) {
        notify(&mut self.day_measurements, measurements)
    }
}

fn fire(handler: &mut Option<Handler>) {
    if let Some(handler) = handler.as_mut() {
        handler();
    }
}

fn notify<T>(listener: &mut Option<Listener<T>>, value: &T) {
    if let Some(listener) = listener.as_mut() {
        listener(value);
    }
}
