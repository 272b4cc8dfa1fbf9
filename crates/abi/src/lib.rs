// Path: crates/abi/src/lib.rs
#![no_std]
#![forbid(unsafe_code)]

//! # Keel ABI
//!
//! The contract ABI artifact: a JSON document describing a contract's
//! constructor and endpoints with their mutability, payment policy,
//! owner-only flag, and typed inputs/outputs. Type names come from
//! `keel_codec::TypeAbi` and form a vocabulary distinct from Rust type
//! names (`"bytes"`, `"Address"`, `"optional<u32>"`, ...).
//!
//! Signature validation lives here too: a variadic parameter or result
//! anywhere but last position is a build-time error, never a silent runtime
//! truncation.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use bitflags::bitflags;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use thiserror::Error;

pub use keel_codec::ErrorCode;

/// Errors raised while validating a contract signature.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AbiError {
    /// A variadic input was declared before the final parameter position.
    #[error(
        "endpoint '{endpoint}': variadic argument '{argument}' must be the last parameter"
    )]
    VariadicInputNotLast {
        /// The endpoint declaring the malformed signature.
        endpoint: String,
        /// The offending argument name.
        argument: String,
    },
    /// A variadic output was declared before the final result position.
    #[error("endpoint '{endpoint}': variadic result must be the last output")]
    VariadicOutputNotLast {
        /// The endpoint declaring the malformed signature.
        endpoint: String,
    },
    /// Two endpoints share an exported name.
    #[error("duplicate endpoint name '{name}'")]
    DuplicateEndpointName {
        /// The name declared twice.
        name: String,
    },
}

impl ErrorCode for AbiError {
    fn code(&self) -> &'static str {
        match self {
            Self::VariadicInputNotLast { .. } => "ABI_VARIADIC_INPUT_NOT_LAST",
            Self::VariadicOutputNotLast { .. } => "ABI_VARIADIC_OUTPUT_NOT_LAST",
            Self::DuplicateEndpointName { .. } => "ABI_DUPLICATE_ENDPOINT",
        }
    }
}

bitflags! {
    /// Endpoint behavior flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct EndpointFlags: u8 {
        /// The endpoint accepts attached payment.
        const PAYABLE = 0b0000_0001;
        /// Only the contract owner may call the endpoint.
        const ONLY_OWNER = 0b0000_0010;
    }
}

/// Whether an endpoint may mutate contract storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EndpointMutability {
    /// The endpoint only reads state.
    Readonly,
    /// The endpoint may write state.
    Mutable,
}

/// One typed endpoint parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InputAbi {
    /// Parameter name as declared in the contract source.
    pub name: String,
    /// ABI type name.
    #[serde(rename = "type")]
    pub type_name: String,
    /// True when the parameter consumes a variable number of trailing
    /// argument slots.
    #[serde(rename = "multiArg", skip_serializing_if = "core::ops::Not::not")]
    pub multi_arg: bool,
}

/// One typed endpoint result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputAbi {
    /// ABI type name.
    #[serde(rename = "type")]
    pub type_name: String,
    /// True when the result occupies a variable number of result slots.
    #[serde(rename = "multiResult", skip_serializing_if = "core::ops::Not::not")]
    pub multi_result: bool,
}

/// The ABI description of one endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointAbi {
    /// Exported endpoint name.
    pub name: String,
    /// Read/write classification.
    pub mutability: EndpointMutability,
    /// Payment and ownership flags.
    pub flags: EndpointFlags,
    /// Declared parameters, in order.
    pub inputs: Vec<InputAbi>,
    /// Declared results, in order.
    pub outputs: Vec<OutputAbi>,
}

impl EndpointAbi {
    /// Creates an endpoint with no parameters, results or flags.
    pub fn new(name: &str, mutability: EndpointMutability) -> Self {
        Self {
            name: String::from(name),
            mutability,
            flags: EndpointFlags::empty(),
            inputs: Vec::new(),
            outputs: Vec::new(),
        }
    }

    /// Appends one parameter.
    pub fn add_input(&mut self, name: &str, type_name: String, multi_arg: bool) {
        self.inputs.push(InputAbi {
            name: String::from(name),
            type_name,
            multi_arg,
        });
    }

    /// Appends one result.
    pub fn add_output(&mut self, type_name: String, multi_result: bool) {
        self.outputs.push(OutputAbi {
            type_name,
            multi_result,
        });
    }
}

// The flag bits render as plain booleans in the artifact; the bitflags
// representation is an implementation detail.
impl Serialize for EndpointAbi {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("EndpointAbi", 6)?;
        state.serialize_field("name", &self.name)?;
        state.serialize_field("mutability", &self.mutability)?;
        state.serialize_field("payable", &self.flags.contains(EndpointFlags::PAYABLE))?;
        state.serialize_field("onlyOwner", &self.flags.contains(EndpointFlags::ONLY_OWNER))?;
        state.serialize_field("inputs", &self.inputs)?;
        state.serialize_field("outputs", &self.outputs)?;
        state.end()
    }
}

/// The ABI description of a whole contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContractAbi {
    /// Contract name.
    pub name: String,
    /// The constructor, if declared.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub constructor: Option<EndpointAbi>,
    /// All exported endpoints, in declaration order.
    pub endpoints: Vec<EndpointAbi>,
}

impl ContractAbi {
    /// Creates an empty contract description.
    pub fn new(name: &str) -> Self {
        Self {
            name: String::from(name),
            constructor: None,
            endpoints: Vec::new(),
        }
    }

    /// Sets the constructor.
    pub fn set_constructor(&mut self, endpoint: EndpointAbi) {
        self.constructor = Some(endpoint);
    }

    /// Appends an endpoint.
    pub fn add_endpoint(&mut self, endpoint: EndpointAbi) {
        self.endpoints.push(endpoint);
    }

    /// Checks every signature: variadic inputs/outputs only in final
    /// position, endpoint names unique.
    pub fn validate(&self) -> Result<(), AbiError> {
        if let Some(constructor) = &self.constructor {
            validate_endpoint(constructor)?;
        }
        for endpoint in &self.endpoints {
            validate_endpoint(endpoint)?;
        }
        for (i, endpoint) in self.endpoints.iter().enumerate() {
            if self.endpoints[i + 1..].iter().any(|e| e.name == endpoint.name) {
                return Err(AbiError::DuplicateEndpointName {
                    name: endpoint.name.clone(),
                });
            }
        }
        Ok(())
    }

    /// Renders the artifact as a JSON document.
    pub fn to_json(&self) -> String {
        // ContractAbi serialization cannot fail: no maps with non-string
        // keys, no floats.
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}

fn validate_endpoint(endpoint: &EndpointAbi) -> Result<(), AbiError> {
    for (i, input) in endpoint.inputs.iter().enumerate() {
        if input.multi_arg && i + 1 != endpoint.inputs.len() {
            return Err(AbiError::VariadicInputNotLast {
                endpoint: endpoint.name.clone(),
                argument: input.name.clone(),
            });
        }
    }
    for (i, output) in endpoint.outputs.iter().enumerate() {
        if output.multi_result && i + 1 != endpoint.outputs.len() {
            return Err(AbiError::VariadicOutputNotLast {
                endpoint: endpoint.name.clone(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    extern crate std;
    use alloc::string::ToString;
    use std::string::String;

    fn endpoint_with_inputs(inputs: &[(&str, &str, bool)]) -> EndpointAbi {
        let mut endpoint = EndpointAbi::new("distribute", EndpointMutability::Mutable);
        for (name, ty, multi) in inputs {
            endpoint.add_input(name, String::from(*ty), *multi);
        }
        endpoint
    }

    #[test]
    fn variadic_in_last_position_is_accepted() {
        let mut abi = ContractAbi::new("staking");
        abi.add_endpoint(endpoint_with_inputs(&[
            ("token", "TokenIdentifier", false),
            ("winners", "variadic<Address>", true),
        ]));
        assert!(abi.validate().is_ok());
    }

    #[test]
    fn variadic_followed_by_parameter_is_rejected_with_context() {
        let mut abi = ContractAbi::new("staking");
        abi.add_endpoint(endpoint_with_inputs(&[
            ("winners", "variadic<Address>", true),
            ("token", "TokenIdentifier", false),
        ]));
        let err = abi.validate().unwrap_err();
        assert_eq!(
            err,
            AbiError::VariadicInputNotLast {
                endpoint: "distribute".to_string(),
                argument: "winners".to_string(),
            }
        );
        // The message names both the endpoint and the argument.
        let message = err.to_string();
        assert!(message.contains("distribute"));
        assert!(message.contains("winners"));
        assert_eq!(err.code(), "ABI_VARIADIC_INPUT_NOT_LAST");
    }

    #[test]
    fn variadic_output_must_be_last() {
        let mut endpoint = EndpointAbi::new("report", EndpointMutability::Readonly);
        endpoint.add_output(String::from("variadic<u64>"), true);
        endpoint.add_output(String::from("u32"), false);
        let mut abi = ContractAbi::new("staking");
        abi.add_endpoint(endpoint);
        assert_eq!(
            abi.validate().unwrap_err(),
            AbiError::VariadicOutputNotLast {
                endpoint: "report".to_string()
            }
        );
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let mut abi = ContractAbi::new("staking");
        abi.add_endpoint(EndpointAbi::new("stake", EndpointMutability::Mutable));
        abi.add_endpoint(EndpointAbi::new("stake", EndpointMutability::Mutable));
        assert_eq!(
            abi.validate().unwrap_err(),
            AbiError::DuplicateEndpointName {
                name: "stake".to_string()
            }
        );
    }

    #[test]
    fn json_artifact_shape() {
        let mut endpoint = EndpointAbi::new("getTotal", EndpointMutability::Readonly);
        endpoint.flags |= EndpointFlags::ONLY_OWNER;
        endpoint.add_output(String::from("BigUint"), false);
        let mut abi = ContractAbi::new("vault");
        abi.add_endpoint(endpoint);

        let json = abi.to_json();
        assert!(json.contains("\"name\": \"vault\""));
        assert!(json.contains("\"mutability\": \"readonly\""));
        assert!(json.contains("\"onlyOwner\": true"));
        assert!(json.contains("\"payable\": false"));
        assert!(json.contains("\"type\": \"BigUint\""));
        // absent constructor is omitted entirely
        assert!(!json.contains("constructor"));
    }
}
