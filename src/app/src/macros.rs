/// Macro for model field updates with automatic rendering.
/// Supports both single and multiple field updates.
///
/// # Examples
///
/// Single field update:
/// ```ignore
/// update_field!(model.error_message, None)
/// ```
///
/// Multiple field updates:
/// ```ignore
/// update_field!(
///     model.unsafe_warning_visible, false;
///     model.error_message, None
/// )
/// ```
#[macro_export]
macro_rules! update_field {
    // Multiple field updates (must come first to match the pattern)
    ($($model_field:expr, $value:expr);+ $(;)?) => {{
        let mut changed = false;
        $(
            let value = $value;
            if $model_field != value {
                $model_field = value;
                changed = true;
            }
        )+
        if changed {
            crux_core::render::render()
        } else {
            crux_core::Command::done()
        }
    }};

    // Single field update
    ($model_field:expr, $value:expr) => {{
        update_field!($model_field, $value;)
    }};
}

/// Macro for requests against the device API.
///
/// Expands to the HTTP command only; the caller decides about loading flags
/// and rendering. The response arrives as `Result<_, String>` in the `result`
/// field of the given domain event, next to the `generation` of the session
/// that sent the request.
///
/// NOTE: local-device URLs are prefixed with `https://relative`.
/// `crux_http` requires absolute URLs and rejects relative paths.
/// The UI shell strips this prefix before sending requests.
///
/// # Patterns
///
/// Pattern 1: Status only
/// ```ignore
/// device_request!(Session, SessionEvent, model, post, "/api/system/restart", RestartResponse)
/// ```
///
/// Pattern 2: JSON response
/// ```ignore
/// device_request!(Wifi, WifiEvent, model, get, "/api/system/wifi/scan", ScanResponse,
///     expect_json: WifiScanResponse
/// )
/// ```
///
/// Pattern 3: JSON body, status only
/// ```ignore
/// device_request!(Session, SessionEvent, model, patch, "/api/system", SaveResponse,
///     body_string: payload.to_string()
/// )
/// ```
#[macro_export]
macro_rules! device_request {
    // Pattern 1: Status only
    ($domain:ident, $domain_event:ident, $model:expr, $method:ident, $path:expr, $response_event:ident) => {{
        let generation = $model.generation;
        $crate::HttpCmd::$method($crate::build_url(&$model.endpoint, $path))
            .build()
            .then_send(move |result| {
                let event_result = $crate::process_status_response(result);
                $crate::events::Event::$domain($crate::events::$domain_event::$response_event {
                    generation,
                    result: event_result,
                })
            })
    }};

    // Pattern 2: JSON response
    ($domain:ident, $domain_event:ident, $model:expr, $method:ident, $path:expr, $response_event:ident, expect_json: $response_type:ty) => {{
        let generation = $model.generation;
        $crate::HttpCmd::$method($crate::build_url(&$model.endpoint, $path))
            .build()
            .then_send(move |result| {
                let event_result: Result<$response_type, String> =
                    $crate::process_json_response(result);
                $crate::events::Event::$domain($crate::events::$domain_event::$response_event {
                    generation,
                    result: event_result,
                })
            })
    }};

    // Pattern 3: JSON body, status only
    ($domain:ident, $domain_event:ident, $model:expr, $method:ident, $path:expr, $response_event:ident, body_string: $body:expr) => {{
        let generation = $model.generation;
        $crate::HttpCmd::$method($crate::build_url(&$model.endpoint, $path))
            .header("Content-Type", "application/json")
            .body_string($body)
            .build()
            .then_send(move |result| {
                let event_result = $crate::process_status_response(result);
                $crate::events::Event::$domain($crate::events::$domain_event::$response_event {
                    generation,
                    result: event_result,
                })
            })
    }};
}
