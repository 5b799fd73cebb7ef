cfg_if! {
    if #[cfg(feature = "transport_http")] {
        pub mod http;
    } else {}
}
