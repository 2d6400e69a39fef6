// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Protobuf messages for TensorBoard event payloads.
//!
//! Only the fields the loader reads are declared; everything else is
//! skipped by prost as unknown. Field numbers follow TensorFlow's
//! `event.proto`, `summary.proto`, `tensor.proto` and `tensor_shape.proto`.
//!
//! `SummaryValueProto` declares the members of the upstream `value` oneof as
//! independent optional fields. A oneof keeps only the last member seen on
//! the wire; independent fields let the decoder see every populated member
//! and pick one by a fixed priority.

/// `tensorflow.Event`
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct EventProto {
    #[prost(double, tag = "1")]
    pub wall_time: f64,
    #[prost(int64, tag = "2")]
    pub step: i64,
    #[prost(string, optional, tag = "3")]
    pub file_version: Option<String>,
    #[prost(message, optional, tag = "5")]
    pub summary: Option<SummaryProto>,
}

/// `tensorflow.Summary`
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SummaryProto {
    #[prost(message, repeated, tag = "1")]
    pub value: Vec<SummaryValueProto>,
}

/// `tensorflow.Summary.Value`
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SummaryValueProto {
    #[prost(string, tag = "1")]
    pub tag: String,
    #[prost(float, optional, tag = "2")]
    pub simple_value: Option<f32>,
    #[prost(bytes = "vec", optional, tag = "3")]
    pub obsolete_old_style_histogram: Option<Vec<u8>>,
    #[prost(message, optional, tag = "4")]
    pub image: Option<ImageProto>,
    #[prost(message, optional, tag = "5")]
    pub histo: Option<HistogramProto>,
    #[prost(message, optional, tag = "6")]
    pub audio: Option<AudioProto>,
    #[prost(string, tag = "7")]
    pub node_name: String,
    #[prost(message, optional, tag = "8")]
    pub tensor: Option<TensorProto>,
    #[prost(message, optional, tag = "9")]
    pub metadata: Option<SummaryMetadataProto>,
}

impl SummaryValueProto {
    /// Plugin name from the value's metadata, if any.
    pub fn plugin_name(&self) -> Option<&str> {
        self.metadata
            .as_ref()
            .and_then(|m| m.plugin_data.as_ref())
            .map(|p| p.plugin_name.as_str())
    }
}

/// `tensorflow.Summary.Image`
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ImageProto {
    #[prost(int32, tag = "1")]
    pub height: i32,
    #[prost(int32, tag = "2")]
    pub width: i32,
    #[prost(int32, tag = "3")]
    pub colorspace: i32,
    #[prost(bytes = "vec", tag = "4")]
    pub encoded_image_string: Vec<u8>,
}

/// `tensorflow.Summary.Audio`
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct AudioProto {
    #[prost(float, tag = "1")]
    pub sample_rate: f32,
    #[prost(int64, tag = "2")]
    pub num_channels: i64,
    #[prost(int64, tag = "3")]
    pub length_frames: i64,
    #[prost(bytes = "vec", tag = "4")]
    pub encoded_audio_string: Vec<u8>,
    #[prost(string, tag = "5")]
    pub content_type: String,
}

/// `tensorflow.HistogramProto`
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct HistogramProto {
    #[prost(double, tag = "1")]
    pub min: f64,
    #[prost(double, tag = "2")]
    pub max: f64,
    #[prost(double, tag = "3")]
    pub num: f64,
    #[prost(double, tag = "4")]
    pub sum: f64,
    #[prost(double, tag = "5")]
    pub sum_squares: f64,
    #[prost(double, repeated, tag = "6")]
    pub bucket_limit: Vec<f64>,
    #[prost(double, repeated, tag = "7")]
    pub bucket: Vec<f64>,
}

/// `tensorflow.SummaryMetadata`
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SummaryMetadataProto {
    #[prost(message, optional, tag = "1")]
    pub plugin_data: Option<PluginDataProto>,
    #[prost(string, tag = "2")]
    pub display_name: String,
    #[prost(string, tag = "3")]
    pub summary_description: String,
}

/// `tensorflow.SummaryMetadata.PluginData`
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PluginDataProto {
    #[prost(string, tag = "1")]
    pub plugin_name: String,
    #[prost(bytes = "vec", tag = "2")]
    pub content: Vec<u8>,
}

/// `tensorflow.TensorProto`
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TensorProto {
    #[prost(int32, tag = "1")]
    pub dtype: i32,
    #[prost(message, optional, tag = "2")]
    pub tensor_shape: Option<TensorShapeProto>,
    #[prost(bytes = "vec", tag = "4")]
    pub tensor_content: Vec<u8>,
    #[prost(float, repeated, tag = "5")]
    pub float_val: Vec<f32>,
    #[prost(double, repeated, tag = "6")]
    pub double_val: Vec<f64>,
    #[prost(int32, repeated, tag = "7")]
    pub int_val: Vec<i32>,
    #[prost(bytes = "vec", repeated, tag = "8")]
    pub string_val: Vec<Vec<u8>>,
    #[prost(int64, repeated, tag = "10")]
    pub int64_val: Vec<i64>,
    #[prost(bool, repeated, tag = "11")]
    pub bool_val: Vec<bool>,
}

/// `tensorflow.TensorShapeProto`
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TensorShapeProto {
    #[prost(message, repeated, tag = "2")]
    pub dim: Vec<TensorShapeDimProto>,
    #[prost(bool, tag = "3")]
    pub unknown_rank: bool,
}

/// `tensorflow.TensorShapeProto.Dim`
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TensorShapeDimProto {
    #[prost(int64, tag = "1")]
    pub size: i64,
    #[prost(string, tag = "2")]
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use prost::Message;

    #[test]
    fn test_event_field_numbers() {
        // wall_time = 1.5 (field 1, fixed64), step = 3 (field 2, varint)
        let mut data = vec![0x09];
        data.extend_from_slice(&1.5f64.to_le_bytes());
        data.extend_from_slice(&[0x10, 0x03]);

        let event = EventProto::decode(&data[..]).unwrap();
        assert_eq!(event.wall_time, 1.5);
        assert_eq!(event.step, 3);
        assert!(event.summary.is_none());
    }

    #[test]
    fn test_unknown_fields_are_skipped() {
        // field 10 (source_metadata), length-delimited, 2 bytes
        let data = [0x52, 0x02, 0xAA, 0xBB, 0x10, 0x07];
        let event = EventProto::decode(&data[..]).unwrap();
        assert_eq!(event.step, 7);
    }

    #[test]
    fn test_value_members_decode_independently() {
        let value = SummaryValueProto {
            tag: "both".to_string(),
            simple_value: Some(1.0),
            image: Some(ImageProto {
                encoded_image_string: vec![1, 2, 3],
                ..Default::default()
            }),
            ..Default::default()
        };
        let decoded = SummaryValueProto::decode(value.encode_to_vec().as_slice()).unwrap();
        assert_eq!(decoded.simple_value, Some(1.0));
        assert!(decoded.image.is_some());
    }

    #[test]
    fn test_plugin_name() {
        let mut value = SummaryValueProto::default();
        assert_eq!(value.plugin_name(), None);
        value.metadata = Some(SummaryMetadataProto {
            plugin_data: Some(PluginDataProto {
                plugin_name: "text".to_string(),
                content: Vec::new(),
            }),
            ..Default::default()
        });
        assert_eq!(value.plugin_name(), Some("text"));
    }
}
