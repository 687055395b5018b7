//! Browser Camera
//!
//! `getUserMedia` implementation of the core camera port. Frames are grabbed
//! by drawing the preview `<video>` onto a canvas and exporting a JPEG data URL.

use async_trait::async_trait;
use js_sys::{Object, Reflect};
use skin_glow::analysis::{Camera, CameraError, CameraResult, CameraStream, CapturedFrame, FrameImage};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    CanvasRenderingContext2d, HtmlCanvasElement, HtmlVideoElement, MediaStream,
    MediaStreamConstraints, MediaStreamTrack,
};

/// Front-facing camera, ideally 1280x720
#[derive(Debug, Clone, Copy, Default)]
pub struct WebCamera;

/// Live `getUserMedia` stream, optionally shown in a preview element
///
/// Dropping the stream stops its tracks.
pub struct WebStream {
    stream: MediaStream,
    video: Option<HtmlVideoElement>,
    stopped: bool,
}

fn js_error(e: JsValue) -> String {
    e.as_string().unwrap_or_else(|| format!("{:?}", e))
}

fn set(target: &Object, key: &str, value: &JsValue) -> CameraResult<()> {
    Reflect::set(target, &key.into(), value)
        .map(|_| ())
        .map_err(|e| CameraError::Unavailable(js_error(e)))
}

/// `{ video: { facingMode: "user", width: { ideal: 1280 }, height: { ideal: 720 } } }`
fn constraints() -> CameraResult<MediaStreamConstraints> {
    let ideal = |value: f64| -> CameraResult<Object> {
        let obj = Object::new();
        set(&obj, "ideal", &value.into())?;
        Ok(obj)
    };

    let video = Object::new();
    set(&video, "facingMode", &"user".into())?;
    set(&video, "width", &ideal(1280.0)?)?;
    set(&video, "height", &ideal(720.0)?)?;

    let constraints = Object::new();
    set(&constraints, "video", &video)?;
    Ok(constraints.unchecked_into())
}

#[async_trait(?Send)]
impl Camera for WebCamera {
    type Stream = WebStream;

    async fn open(&self) -> CameraResult<WebStream> {
        let window = web_sys::window()
            .ok_or_else(|| CameraError::Unavailable("no window".to_string()))?;
        let devices = window
            .navigator()
            .media_devices()
            .map_err(|e| CameraError::Unavailable(js_error(e)))?;

        let promise = devices
            .get_user_media_with_constraints(&constraints()?)
            .map_err(|e| CameraError::Unavailable(js_error(e)))?;
        let stream = JsFuture::from(promise)
            .await
            .map_err(|e| CameraError::Unavailable(js_error(e)))?
            .dyn_into::<MediaStream>()
            .map_err(|e| CameraError::Unavailable(js_error(e)))?;

        Ok(WebStream {
            stream,
            video: None,
            stopped: false,
        })
    }
}

impl WebStream {
    /// Show the stream in `video`; captures are taken from this element
    pub fn attach_preview(&mut self, video: HtmlVideoElement) {
        video.set_src_object(Some(&self.stream));
        self.video = Some(video);
    }

    fn snapshot(video: &HtmlVideoElement) -> Result<String, JsValue> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsValue::from_str("no document"))?;

        let canvas: HtmlCanvasElement = document.create_element("canvas")?.dyn_into()?;
        canvas.set_width(video.video_width());
        canvas.set_height(video.video_height());

        let context: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("no 2d context"))?
            .dyn_into()?;
        context.draw_image_with_html_video_element(video, 0.0, 0.0)?;

        canvas.to_data_url_with_type("image/jpeg")
    }
}

impl CameraStream for WebStream {
    fn capture(&mut self) -> CameraResult<CapturedFrame> {
        if self.stopped {
            return Err(CameraError::Stopped);
        }
        let video = self
            .video
            .as_ref()
            .ok_or_else(|| CameraError::Capture("no preview element".to_string()))?;

        let data_url = Self::snapshot(video).map_err(|e| CameraError::Capture(js_error(e)))?;
        Ok(CapturedFrame::new(FrameImage::DataUrl(data_url)))
    }

    fn stop(&mut self) {
        if self.stopped {
            return;
        }
        self.stopped = true;

        for track in self.stream.get_tracks().iter() {
            if let Ok(track) = track.dyn_into::<MediaStreamTrack>() {
                track.stop();
            }
        }
        if let Some(video) = &self.video {
            video.set_src_object(None);
        }
    }
}

impl Drop for WebStream {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn preview_with_stream() -> (HtmlVideoElement, WebStream) {
        let video: HtmlVideoElement = web_sys::window()
            .and_then(|w| w.document())
            .unwrap()
            .create_element("video")
            .unwrap()
            .dyn_into()
            .unwrap();
        let mut stream = WebStream {
            stream: MediaStream::new().unwrap(),
            video: None,
            stopped: false,
        };
        stream.attach_preview(video.clone());
        (video, stream)
    }

    #[wasm_bindgen_test]
    fn test_dropped_stream_is_released() {
        let (video, stream) = preview_with_stream();
        assert!(video.src_object().is_some());

        drop(stream);
        assert!(video.src_object().is_none());
    }

    #[wasm_bindgen_test]
    fn test_stopped_stream_refuses_capture() {
        let (video, mut stream) = preview_with_stream();
        stream.stop();
        stream.stop();

        assert!(video.src_object().is_none());
        assert!(matches!(stream.capture(), Err(CameraError::Stopped)));
    }
}
