//! JSON-Schema fragments for provider-specific configuration forms.

use serde_json::{json, Value};

pub const IDP_AUTHORITIES: [&str; 6] =
    ["internal", "password", "webauthn", "oidc", "saml", "openidfed"];
pub const AP_AUTHORITIES: [&str; 4] = ["internal", "mapper", "script", "webhook"];

/// OAuth2 client settings of an application.
pub fn oauth2_client() -> Value {
    json!({
        "type": "object",
        "properties": {
            "authorizedGrantTypes": {
                "title": "Authorized grant types",
                "type": "array",
                "uniqueItems": true,
                "items": {
                    "type": "string",
                    "enum": [
                        "authorization_code",
                        "implicit",
                        "refresh_token",
                        "password",
                        "client_credentials",
                        "urn:ietf:params:oauth:grant-type:device_code"
                    ]
                }
            },
            "redirectUris": {
                "title": "Redirect URIs",
                "type": "array",
                "items": { "type": "string", "format": "uri" }
            },
            "authenticationMethods": {
                "title": "Client authentication methods",
                "type": "array",
                "uniqueItems": true,
                "items": {
                    "type": "string",
                    "enum": ["client_secret_basic", "client_secret_post", "private_key_jwt", "none"]
                }
            },
            "applicationType": {
                "type": "string",
                "enum": ["web", "native", "machine", "spa", "introspection"]
            },
            "tokenType": { "type": "string", "enum": ["jwt", "opaque"] },
            "firstParty": { "type": "boolean", "default": false },
            "idTokenClaims": { "type": "boolean", "default": false },
            "refreshTokenRotation": { "type": "boolean", "default": false },
            "accessTokenValidity": { "type": "integer", "minimum": 0 },
            "refreshTokenValidity": { "type": "integer", "minimum": 0 },
            "idTokenValidity": { "type": "integer", "minimum": 0 },
            "jwks": { "type": "string" },
            "jwksUri": { "type": "string", "format": "uri" }
        },
        "required": ["authorizedGrantTypes", "authenticationMethods"]
    })
}

/// Identity provider settings for an authority type.
pub fn identity_provider(authority: &str) -> Option<Value> {
    let schema = match authority {
        "internal" => json!({
            "type": "object",
            "properties": {
                "enableRegistration": { "type": "boolean", "default": true },
                "enableDelete": { "type": "boolean", "default": true },
                "enableUpdate": { "type": "boolean", "default": true },
                "confirmationRequired": { "type": "boolean", "default": true },
                "confirmationValidity": { "type": "integer", "minimum": 0 }
            }
        }),
        "password" => json!({
            "type": "object",
            "properties": {
                "enablePasswordReset": { "type": "boolean", "default": true },
                "passwordResetValidity": { "type": "integer", "minimum": 0 },
                "passwordMinLength": { "type": "integer", "minimum": 1, "default": 8 },
                "passwordMaxLength": { "type": "integer", "minimum": 1 },
                "passwordRequireAlpha": { "type": "boolean" },
                "passwordRequireUppercaseAlpha": { "type": "boolean" },
                "passwordRequireNumber": { "type": "boolean" },
                "passwordRequireSpecial": { "type": "boolean" },
                "passwordSupportWhitespace": { "type": "boolean" },
                "passwordKeepNumber": { "type": "integer", "minimum": 0 },
                "passwordMaxDays": { "type": "integer", "minimum": -1 }
            }
        }),
        "webauthn" => json!({
            "type": "object",
            "properties": {
                "allowUntrustedAttestation": { "type": "boolean", "default": false },
                "requireResidentKey": { "type": "boolean", "default": false },
                "requireUserVerification": { "type": "boolean", "default": true },
                "registrationTimeout": { "type": "integer", "minimum": 0 }
            }
        }),
        "oidc" => json!({
            "type": "object",
            "properties": {
                "clientId": { "type": "string" },
                "clientSecret": { "type": "string" },
                "clientJwk": { "type": "string" },
                "clientAuthenticationMethod": {
                    "type": "string",
                    "enum": ["client_secret_basic", "client_secret_post", "private_key_jwt", "none"]
                },
                "issuerUri": { "type": "string", "format": "uri" },
                "authorizationUri": { "type": "string", "format": "uri" },
                "tokenUri": { "type": "string", "format": "uri" },
                "jwkSetUri": { "type": "string", "format": "uri" },
                "userInfoUri": { "type": "string", "format": "uri" },
                "scope": { "type": "string", "default": "openid,email" },
                "userNameAttributeName": { "type": "string", "default": "sub" },
                "enablePkce": { "type": "boolean", "default": true },
                "trustEmailAddress": { "type": "boolean", "default": false },
                "alwaysTrustEmailAddress": { "type": "boolean", "default": false }
            },
            "required": ["clientId"]
        }),
        "saml" => json!({
            "type": "object",
            "properties": {
                "entityId": { "type": "string" },
                "signingKey": { "type": "string" },
                "signingCertificate": { "type": "string" },
                "cryptKey": { "type": "string" },
                "cryptCertificate": { "type": "string" },
                "idpEntityId": { "type": "string" },
                "idpMetadataUrl": { "type": "string", "format": "uri" },
                "webSsoUrl": { "type": "string", "format": "uri" },
                "webLogoutUrl": { "type": "string", "format": "uri" },
                "signAuthNRequest": { "type": "boolean", "default": true },
                "ssoServiceBinding": {
                    "type": "string",
                    "enum": ["HTTP-POST", "HTTP-Redirect"]
                },
                "nameIDFormat": { "type": "string" },
                "userNameAttributeName": { "type": "string" }
            },
            "required": ["entityId"]
        }),
        "openidfed" => json!({
            "type": "object",
            "properties": {
                "clientId": { "type": "string" },
                "trustAnchor": { "type": "string", "format": "uri" },
                "providers": {
                    "type": "array",
                    "items": { "type": "string", "format": "uri" }
                },
                "clientJwks": { "type": "string" },
                "scope": { "type": "string" },
                "claims": { "type": "array", "items": { "type": "string" } },
                "userNameAttributeName": { "type": "string" }
            },
            "required": ["clientId", "trustAnchor"]
        }),
        _ => return None,
    };
    Some(schema)
}

/// Attribute provider settings for an authority type.
pub fn attribute_provider(authority: &str) -> Option<Value> {
    let schema = match authority {
        "internal" => json!({
            "type": "object",
            "properties": {
                "usermode": { "type": "boolean", "default": false },
                "deleteOnUnlink": { "type": "boolean", "default": false }
            }
        }),
        "mapper" => json!({
            "type": "object",
            "properties": {
                "type": {
                    "type": "string",
                    "enum": ["default", "exact"]
                }
            }
        }),
        "script" => json!({
            "type": "object",
            "properties": {
                "code": { "type": "string", "format": "javascript" }
            },
            "required": ["code"]
        }),
        "webhook" => json!({
            "type": "object",
            "properties": {
                "url": { "type": "string", "format": "uri" },
                "authentication": {
                    "type": "string",
                    "enum": ["none", "basic", "bearer"]
                },
                "username": { "type": "string" },
                "password": { "type": "string" },
                "token": { "type": "string" }
            },
            "required": ["url"]
        }),
        _ => return None,
    };
    Some(schema)
}
