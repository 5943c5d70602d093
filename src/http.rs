use std::io::{self, Read};

use serde::de::DeserializeOwned;
use serde::Serialize;
use ureq;

const USER_AGENT: &str = concat!("ionos-dyndns ", env!("CARGO_PKG_VERSION"));

pub struct Request {
    inner: ureq::Request,
}

pub struct Response {
    reader: Box<dyn Read>,
}

pub enum Error {
    Status(u16, Response),
    Transport(Box<str>),
}

impl Request {
    pub fn get(url: &str) -> Self {
        let inner = ureq::get(url).set("User-Agent", USER_AGENT);
        Self { inner }
    }

    pub fn post(url: &str) -> Self {
        let inner = ureq::post(url).set("User-Agent", USER_AGENT);
        Self { inner }
    }

    pub fn patch(url: &str) -> Self {
        let inner = ureq::request("PATCH", url).set("User-Agent", USER_AGENT);
        Self { inner }
    }

    pub fn set(mut self, header: &str, value: &str) -> Self {
        self.inner = self.inner.set(header, value);
        self
    }

    pub fn call(self) -> Result<Response, Error> {
        self.inner
            .call()
            .map_err(|e| match e {
                ureq::Error::Status(code, resp) => Error::Status(
                    code,
                    Response {
                        reader: resp.into_reader(),
                    },
                ),
                ureq::Error::Transport(tp) => Error::Transport(tp.to_string().into()),
            })
            .map(|resp| Response {
                reader: resp.into_reader(),
            })
    }

    pub fn send_json(self, data: impl Serialize) -> Result<Response, Error> {
        self.inner
            .send_json(data)
            .map_err(|e| match e {
                ureq::Error::Status(code, resp) => Error::Status(
                    code,
                    Response {
                        reader: resp.into_reader(),
                    },
                ),
                ureq::Error::Transport(tp) => Error::Transport(tp.to_string().into()),
            })
            .map(|resp| Response {
                reader: resp.into_reader(),
            })
    }
}

impl Response {
    pub fn into_json<T: DeserializeOwned>(self) -> Result<T, io::Error> {
        serde_json::from_reader(self.reader)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    pub fn into_string(self) -> Result<String, io::Error> {
        let mut vec = Vec::with_capacity(1024);
        let read = self.reader.take(2 * 1024 * 1024).read_to_end(&mut vec)?;
        vec.resize(read, 0);
        String::from_utf8(vec).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }
}
