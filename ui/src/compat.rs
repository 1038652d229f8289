//! Platform shims: timers, the clipboard and file picking behave differently
//! in the browser and on native targets.

// Re-export the public API from the appropriate module
#[cfg(target_arch = "wasm32")]
pub use wasm32::*;

#[cfg(not(target_arch = "wasm32"))]
pub use non_wasm32::*;

#[cfg(target_arch = "wasm32")]
pub mod wasm32 {
    use std::time::Duration;
    use tokio::sync::oneshot;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{self, FileReader, HtmlInputElement, Window};

    pub async fn sleep(duration: Duration) {
        gloo_timers::future::sleep(duration).await;
    }

    pub async fn clipboard_set(text: String) -> bool {
        match web_sys::window().map(|win: Window| win.navigator().clipboard()) {
            Some(clipboard) => {
                let promise = clipboard.write_text(&text);
                JsFuture::from(promise).await.is_ok()
            }
            _ => false,
        }
    }

    /// Lets the user pick a file with the given extension and returns its
    /// text. `Ok(None)` when nothing was picked.
    pub async fn read_file(extension: &str) -> Result<Option<String>, String> {
        let (tx, rx) = oneshot::channel();
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or("no document")?;
        let body = document.body().ok_or("no document body")?;
        let input: HtmlInputElement = document
            .create_element("input")
            .map_err(|e| e.as_string().unwrap_or_default())?
            .dyn_into()
            .map_err(|_| "Failed to cast to HtmlInputElement".to_string())?;
        input.set_type("file");
        input.set_accept(&format!(".{}", extension));

        let onchange_closure = Closure::once(move |event: web_sys::Event| {
            let file = event
                .target()
                .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
                .and_then(|input| input.files())
                .and_then(|files| files.get(0));
            let Some(file) = file else {
                let _ = tx.send(Ok(None));
                return;
            };
            let reader = match FileReader::new() {
                Ok(r) => r,
                Err(_) => {
                    let _ = tx.send(Err("Failed to create FileReader".to_string()));
                    return;
                }
            };
            let reader_clone = reader.clone();
            let onload_closure = Closure::once(move |_: web_sys::ProgressEvent| {
                let text = reader_clone.result().ok().and_then(|r| r.as_string());
                let _ = tx.send(Ok(text));
            });
            reader.set_onload(Some(onload_closure.as_ref().unchecked_ref()));
            let _ = reader.read_as_text(&file);
            onload_closure.forget();
        });
        input.set_onchange(Some(onchange_closure.as_ref().unchecked_ref()));
        onchange_closure.forget();

        body.append_child(&input)
            .map_err(|e| e.as_string().unwrap_or_default())?;
        input.click();
        body.remove_child(&input)
            .map_err(|e| e.as_string().unwrap_or_default())?;

        rx.await.map_err(|e| e.to_string())?
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub mod non_wasm32 {
    use dioxus_clipboard::prelude::*;
    use std::time::Duration;

    pub async fn sleep(duration: Duration) {
        tokio::time::sleep(duration).await;
    }

    pub async fn clipboard_set(text: String) -> bool {
        let mut clipboard = use_clipboard();
        clipboard.set(text).is_ok()
    }

    /// Prompts the user to select a file and reads its content as a string.
    pub async fn read_file(extension: &str) -> Result<Option<String>, String> {
        let file_handle = rfd::AsyncFileDialog::new()
            .add_filter("Settings", &[extension])
            .pick_file()
            .await;

        if let Some(handle) = file_handle {
            let content = tokio::fs::read_to_string(handle.path())
                .await
                .map_err(|e| e.to_string())?;
            Ok(Some(content))
        } else {
            Ok(None)
        }
    }
}
