/// 后端返回数据的序列化/反序列化辅助模块

use serde::{Deserialize, Deserializer, Serializer};

/// 不透明的记录ID：后端可能给出字符串（UUID）或数字
pub mod opaque_id {
    use super::*;

    pub fn serialize<S>(id: &str, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(id)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum IdValue {
            String(String),
            Number(serde_json::Number),
        }

        match IdValue::deserialize(deserializer)? {
            IdValue::String(s) => Ok(s),
            IdValue::Number(n) => Ok(n.to_string()),
        }
    }
}

/// 缺失或为 null 的字段按默认值处理
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
