use hyper::body::Bytes;
use std::{
    convert::Infallible,
    pin::Pin,
    task::{self, Poll},
};

/// Request body
///
/// Either empty or a single buffer. The client never streams requests out,
/// so that's all it takes.
#[derive(Clone, Debug, Default)]
pub struct Body {
    data: Option<Bytes>,
}

impl Body {
    /// An empty body
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// A body carrying a single buffer
    pub fn data<D>(data: D) -> Self
    where
        D: Into<Bytes>,
    {
        Self {
            data: Some(data.into()),
        }
    }
}

impl From<Bytes> for Body {
    fn from(value: Bytes) -> Self {
        Self::data(value)
    }
}

impl From<String> for Body {
    fn from(value: String) -> Self {
        Self::data(value)
    }
}

impl From<Vec<u8>> for Body {
    fn from(value: Vec<u8>) -> Self {
        Self::data(value)
    }
}

impl From<&'static str> for Body {
    fn from(value: &'static str) -> Self {
        Self::data(value)
    }
}

impl http_body::Body for Body {
    type Data = Bytes;
    type Error = Infallible;

    fn poll_frame(
        self: Pin<&mut Self>,
        _cx: &mut task::Context<'_>,
    ) -> Poll<Option<Result<http_body::Frame<Self::Data>, Self::Error>>> {
        let frame = self.get_mut().data.take().map(http_body::Frame::data);
        Poll::Ready(frame.map(Ok))
    }

    fn is_end_stream(&self) -> bool {
        self.data.is_none()
    }

    fn size_hint(&self) -> http_body::SizeHint {
        let len = self.data.as_ref().map_or(0, Bytes::len);
        http_body::SizeHint::with_exact(len as u64)
    }
}
