//! Browser backend over the File System Access API
//!
//! Pickers, writable streams and reads go through a small JavaScript glue
//! module (`web.js`). Handles stay opaque `JsValue`s owned by the browser.
//! Rejected promises are mapped with [`Error::from_dom_exception`].

use crate::error::{Error, Result};
use crate::files::picker::PickerOptions;
use crate::files::system::{release_after_close, FileSystem, WritableStream};
use js_sys::{Reflect, Uint8Array};
use log::debug;
use wasm_bindgen::prelude::*;

#[wasm_bindgen(module = "/src/files/web.js")]
extern "C" {
    #[wasm_bindgen(js_name = showOpenPicker, catch)]
    async fn show_open_picker(options_json: &str) -> std::result::Result<JsValue, JsValue>;

    #[wasm_bindgen(js_name = showSavePicker, catch)]
    async fn show_save_picker(options_json: &str) -> std::result::Result<JsValue, JsValue>;

    #[wasm_bindgen(js_name = createWritable, catch)]
    async fn create_writable(file_handle: &JsValue) -> std::result::Result<JsValue, JsValue>;

    #[wasm_bindgen(js_name = writeChunk, catch)]
    async fn write_chunk(stream: &JsValue, bytes: &[u8]) -> std::result::Result<JsValue, JsValue>;

    #[wasm_bindgen(js_name = closeWritable, catch)]
    async fn close_writable(stream: &JsValue) -> std::result::Result<JsValue, JsValue>;

    #[wasm_bindgen(js_name = abortWritable)]
    fn abort_writable(stream: &JsValue);

    #[wasm_bindgen(js_name = readFile, catch)]
    async fn read_file(file_handle: &JsValue) -> std::result::Result<JsValue, JsValue>;
}

/// Convert a rejected promise value into an [`Error`].
fn js_error(value: JsValue) -> Error {
    let field = |key: &str| {
        Reflect::get(&value, &JsValue::from_str(key))
            .ok()
            .and_then(|v| v.as_string())
    };

    match field("name") {
        Some(name) => Error::from_dom_exception(&name, &field("message").unwrap_or_default()),
        None => Error::Platform {
            name: "Error".to_string(),
            message: format!("{:?}", value),
        },
    }
}

/// A `FileSystemFileHandle` returned by one of the pickers.
#[derive(Debug, Clone)]
pub struct WebFileHandle(JsValue);

impl WebFileHandle {
    pub fn as_js(&self) -> &JsValue {
        &self.0
    }
}

/// [`FileSystem`] backed by the browser's file pickers.
#[derive(Debug, Clone, Copy, Default)]
pub struct WebFileSystem;

impl WebFileSystem {
    pub fn new() -> Self {
        Self
    }
}

impl FileSystem for WebFileSystem {
    type Handle = WebFileHandle;
    type Writable = WebWritable;

    async fn show_open_picker(&self, options: &PickerOptions) -> Result<WebFileHandle> {
        let json = options.to_platform_json()?;
        debug!("showOpenFilePicker({})", json);
        show_open_picker(&json).await.map(WebFileHandle).map_err(js_error)
    }

    async fn show_save_picker(&self, options: &PickerOptions) -> Result<WebFileHandle> {
        let json = options.to_platform_json()?;
        debug!("showSaveFilePicker({})", json);
        show_save_picker(&json).await.map(WebFileHandle).map_err(js_error)
    }

    async fn create_writable(&self, handle: &WebFileHandle) -> Result<WebWritable> {
        let stream = create_writable(&handle.0).await.map_err(js_error)?;
        Ok(WebWritable {
            stream: Some(stream),
        })
    }

    async fn read_all(&self, handle: &WebFileHandle) -> Result<Vec<u8>> {
        let bytes = read_file(&handle.0).await.map_err(js_error)?;
        Ok(Uint8Array::new(&bytes).to_vec())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Writable Stream
// ─────────────────────────────────────────────────────────────────────────────

/// A `FileSystemWritableFileStream`. The browser commits the swap file on
/// close and discards it on abort.
#[derive(Debug)]
pub struct WebWritable {
    stream: Option<JsValue>,
}

impl WritableStream for WebWritable {
    async fn write(&mut self, payload: &[u8]) -> Result<()> {
        let Some(stream) = self.stream.as_ref() else {
            return Err(Error::Platform {
                name: "InvalidStateError".to_string(),
                message: "stream already closed".to_string(),
            });
        };
        write_chunk(stream, payload).await.map(|_| ()).map_err(js_error)
    }

    async fn close(mut self) -> Result<()> {
        release_after_close(&mut self.stream, |stream| async move {
            close_writable(&stream).await.map(|_| ()).map_err(js_error)
        })
        .await
    }
}

impl Drop for WebWritable {
    fn drop(&mut self) {
        if let Some(stream) = self.stream.take() {
            abort_writable(&stream);
        }
    }
}
