//! Token deployment, minting and approval batches.

use model::Account;
use primitive_types::U256;

/// A value that may be given either as a single item or as a list.
#[derive(Clone, Debug, PartialEq)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> From<T> for OneOrMany<T> {
    fn from(item: T) -> Self {
        Self::One(item)
    }
}

impl<T> From<Vec<T>> for OneOrMany<T> {
    fn from(items: Vec<T>) -> Self {
        Self::Many(items)
    }
}

#[derive(Debug, Eq, PartialEq, thiserror::Error)]
pub enum NormalizeError {
    #[error("Inconsistent mint sender length")]
    InconsistentSenderLength,
}

/// Raw token deployment parameters: either a bare symbol or a partial spec.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawTokenDeployment {
    pub name: Option<String>,
    pub symbol: Option<String>,
    pub decimals: Option<u8>,
    pub from: Option<Account>,
}

impl From<&str> for RawTokenDeployment {
    fn from(symbol: &str) -> Self {
        Self {
            symbol: Some(symbol.to_string()),
            ..Default::default()
        }
    }
}

/// A batch of raw token deployments: a bare count expands to that many default
/// tokens, otherwise a single spec or a list of specs.
#[derive(Clone, Debug, PartialEq)]
pub enum RawTokensDeployment {
    Count(usize),
    One(RawTokenDeployment),
    Many(Vec<RawTokenDeployment>),
}

impl From<usize> for RawTokensDeployment {
    fn from(count: usize) -> Self {
        Self::Count(count)
    }
}

impl From<RawTokenDeployment> for RawTokensDeployment {
    fn from(token: RawTokenDeployment) -> Self {
        Self::One(token)
    }
}

impl From<Vec<RawTokenDeployment>> for RawTokensDeployment {
    fn from(tokens: Vec<RawTokenDeployment>) -> Self {
        Self::Many(tokens)
    }
}

/// A fully specified token deployment.
#[derive(Clone, Debug, PartialEq)]
pub struct TokenDeployment {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    /// The deployer, when one was requested; the deployment layer picks its
    /// default sender otherwise.
    pub from: Option<Account>,
}

/// Expands a raw batch of token deployments into one consistent deployment
/// record per token. Unspecified symbols and names default to indexed values
/// (`TK0`, `Token 0`, ...) and the given default sender applies to every entry
/// that does not name its own.
pub fn normalize_token_deployments(
    raw: impl Into<RawTokensDeployment>,
    from: Option<&Account>,
) -> Vec<TokenDeployment> {
    let entries = match raw.into() {
        RawTokensDeployment::Count(count) => vec![RawTokenDeployment::default(); count],
        RawTokensDeployment::One(token) => vec![token],
        RawTokensDeployment::Many(tokens) => tokens,
    };

    entries
        .into_iter()
        .enumerate()
        .map(|(index, mut entry)| {
            entry.symbol.get_or_insert_with(|| format!("TK{index}"));
            entry.name.get_or_insert_with(|| format!("Token {index}"));
            if entry.from.is_none() {
                entry.from = from.cloned();
            }
            normalize_token_deployment(entry)
        })
        .collect()
}

/// Fills in the defaults for a single token deployment: `Token`, `TKN`, 18
/// decimals.
pub fn normalize_token_deployment(raw: impl Into<RawTokenDeployment>) -> TokenDeployment {
    let raw = raw.into();
    TokenDeployment {
        name: raw.name.unwrap_or_else(|| "Token".to_string()),
        symbol: raw.symbol.unwrap_or_else(|| "TKN".to_string()),
        decimals: raw.decimals.unwrap_or(18),
        from: raw.from,
    }
}

/// A raw mint instruction. Recipients and senders may be given as single
/// accounts or as lists.
#[derive(Clone, Debug, PartialEq)]
pub struct RawTokenMint {
    pub to: OneOrMany<Account>,
    pub from: Option<OneOrMany<Account>>,
    pub amount: U256,
}

/// A fully specified mint: one recipient, at most one sender.
#[derive(Clone, Debug, PartialEq)]
pub struct TokenMint {
    pub to: Account,
    pub from: Option<Account>,
    pub amount: U256,
}

/// Expands raw mint instructions into one mint record per recipient. A list of
/// senders must pair up with the recipient list by index, so their lengths
/// have to match exactly; a single (or absent) sender applies to every
/// recipient.
pub fn normalize_token_mints(
    raw: impl Into<OneOrMany<RawTokenMint>>,
) -> Result<Vec<TokenMint>, NormalizeError> {
    let batch = match raw.into() {
        OneOrMany::One(mint) => return normalize_token_mint(mint),
        OneOrMany::Many(batch) => batch,
    };

    let mut mints = Vec::new();
    for mint in batch {
        mints.extend(normalize_token_mint(mint)?);
    }
    Ok(mints)
}

fn normalize_token_mint(mint: RawTokenMint) -> Result<Vec<TokenMint>, NormalizeError> {
    let RawTokenMint { to, from, amount } = mint;

    let recipients = match to {
        OneOrMany::One(to) => {
            // A single recipient cannot pair up with a sender list.
            if matches!(from, Some(OneOrMany::Many(_))) {
                return Err(NormalizeError::InconsistentSenderLength);
            }
            let from = match from {
                Some(OneOrMany::One(from)) => Some(from),
                _ => None,
            };
            return Ok(vec![TokenMint { to, from, amount }]);
        }
        OneOrMany::Many(recipients) => recipients,
    };

    match from {
        Some(OneOrMany::Many(senders)) => {
            if senders.len() != recipients.len() {
                return Err(NormalizeError::InconsistentSenderLength);
            }
            Ok(recipients
                .into_iter()
                .zip(senders)
                .map(|(to, from)| TokenMint {
                    to,
                    from: Some(from),
                    amount,
                })
                .collect())
        }
        from => {
            let from = match from {
                Some(OneOrMany::One(from)) => Some(from),
                _ => None,
            };
            Ok(recipients
                .into_iter()
                .map(|to| TokenMint {
                    to,
                    from: from.clone(),
                    amount,
                })
                .collect())
        }
    }
}

/// A raw approval instruction, shaped like a mint.
#[derive(Clone, Debug, PartialEq)]
pub struct RawTokenApproval {
    pub to: OneOrMany<Account>,
    pub from: Option<OneOrMany<Account>>,
    pub amount: U256,
}

/// A fully specified approval: one spender, at most one owner.
#[derive(Clone, Debug, PartialEq)]
pub struct TokenApproval {
    pub to: Account,
    pub from: Option<Account>,
    pub amount: U256,
}

/// Expands raw approval instructions into one approval record per
/// spender/owner combination: unlike mints, a list of senders is not paired by
/// index but crossed with every recipient.
pub fn normalize_token_approvals(
    raw: impl Into<OneOrMany<RawTokenApproval>>,
) -> Vec<TokenApproval> {
    let batch = match raw.into() {
        OneOrMany::One(approval) => return normalize_token_approval(approval),
        OneOrMany::Many(batch) => batch,
    };
    batch
        .into_iter()
        .flat_map(normalize_token_approval)
        .collect()
}

fn normalize_token_approval(approval: RawTokenApproval) -> Vec<TokenApproval> {
    let RawTokenApproval { to, from, amount } = approval;
    let recipients = match to {
        OneOrMany::One(to) => vec![to],
        OneOrMany::Many(recipients) => recipients,
    };

    recipients
        .into_iter()
        .flat_map(|to| -> Vec<TokenApproval> {
            match &from {
                Some(OneOrMany::Many(senders)) => senders
                    .iter()
                    .map(|from| TokenApproval {
                        to: to.clone(),
                        from: Some(from.clone()),
                        amount,
                    })
                    .collect(),
                Some(OneOrMany::One(from)) => vec![TokenApproval {
                    to,
                    from: Some(from.clone()),
                    amount,
                }],
                None => vec![TokenApproval {
                    to,
                    from: None,
                    amount,
                }],
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use primitive_types::H160;

    fn account(byte: u8) -> Account {
        Account::Address(H160([byte; 20]))
    }

    #[test]
    fn deployment_from_a_bare_symbol() {
        assert_eq!(
            normalize_token_deployment("DAI"),
            TokenDeployment {
                name: "Token".to_string(),
                symbol: "DAI".to_string(),
                decimals: 18,
                from: None,
            }
        );
    }

    #[test]
    fn deployments_from_a_count() {
        let sender = account(0xab);
        let deployments = normalize_token_deployments(3, Some(&sender));
        assert_eq!(
            deployments,
            vec![
                TokenDeployment {
                    name: "Token 0".to_string(),
                    symbol: "TK0".to_string(),
                    decimals: 18,
                    from: Some(sender.clone()),
                },
                TokenDeployment {
                    name: "Token 1".to_string(),
                    symbol: "TK1".to_string(),
                    decimals: 18,
                    from: Some(sender.clone()),
                },
                TokenDeployment {
                    name: "Token 2".to_string(),
                    symbol: "TK2".to_string(),
                    decimals: 18,
                    from: Some(sender),
                },
            ]
        );
    }

    #[test]
    fn deployments_from_a_symbol_list_keep_indexed_names() {
        let deployments = normalize_token_deployments(
            vec![
                RawTokenDeployment::from("DAI"),
                RawTokenDeployment::from("USDC"),
            ],
            None,
        );
        assert_eq!(deployments[0].symbol, "DAI");
        assert_eq!(deployments[0].name, "Token 0");
        assert_eq!(deployments[1].symbol, "USDC");
        assert_eq!(deployments[1].name, "Token 1");
    }

    #[test]
    fn deployment_entries_override_defaults() {
        let deployments = normalize_token_deployments(
            RawTokenDeployment {
                name: Some("Wrapped Ether".to_string()),
                symbol: Some("WETH".to_string()),
                decimals: Some(6),
                from: Some(account(0x11)),
            },
            Some(&account(0x22)),
        );
        assert_eq!(
            deployments,
            vec![TokenDeployment {
                name: "Wrapped Ether".to_string(),
                symbol: "WETH".to_string(),
                decimals: 6,
                from: Some(account(0x11)),
            }]
        );
    }

    #[test]
    fn mint_with_single_recipient_and_sender() {
        let mints = normalize_token_mints(RawTokenMint {
            to: account(1).into(),
            from: Some(account(2).into()),
            amount: 100.into(),
        })
        .unwrap();
        assert_eq!(
            mints,
            vec![TokenMint {
                to: account(1),
                from: Some(account(2)),
                amount: 100.into(),
            }]
        );
    }

    #[test]
    fn mint_pairs_recipients_and_senders_by_index() {
        let mints = normalize_token_mints(RawTokenMint {
            to: vec![account(1), account(2)].into(),
            from: Some(vec![account(3), account(4)].into()),
            amount: 7.into(),
        })
        .unwrap();
        assert_eq!(
            mints,
            vec![
                TokenMint {
                    to: account(1),
                    from: Some(account(3)),
                    amount: 7.into(),
                },
                TokenMint {
                    to: account(2),
                    from: Some(account(4)),
                    amount: 7.into(),
                },
            ]
        );
    }

    #[test]
    fn mint_reuses_a_single_sender() {
        let mints = normalize_token_mints(RawTokenMint {
            to: vec![account(1), account(2), account(3)].into(),
            from: Some(account(9).into()),
            amount: 7.into(),
        })
        .unwrap();
        assert_eq!(mints.len(), 3);
        assert!(mints.iter().all(|mint| mint.from == Some(account(9))));
    }

    #[test]
    fn mint_sender_list_length_must_match() {
        let result = normalize_token_mints(RawTokenMint {
            to: vec![account(1), account(2)].into(),
            from: Some(vec![account(3)].into()),
            amount: 7.into(),
        });
        assert_eq!(result, Err(NormalizeError::InconsistentSenderLength));
    }

    #[test]
    fn mint_scalar_recipient_rejects_sender_list() {
        let result = normalize_token_mints(RawTokenMint {
            to: account(1).into(),
            from: Some(vec![account(2)].into()),
            amount: 7.into(),
        });
        assert_eq!(result, Err(NormalizeError::InconsistentSenderLength));
    }

    #[test]
    fn mint_batches_are_flattened() {
        let mints = normalize_token_mints(vec![
            RawTokenMint {
                to: account(1).into(),
                from: None,
                amount: 1.into(),
            },
            RawTokenMint {
                to: vec![account(2), account(3)].into(),
                from: None,
                amount: 2.into(),
            },
        ])
        .unwrap();
        assert_eq!(mints.len(), 3);
    }

    #[test]
    fn error_message() {
        assert_eq!(
            NormalizeError::InconsistentSenderLength.to_string(),
            "Inconsistent mint sender length"
        );
    }

    #[test]
    fn approvals_cross_recipients_with_senders() {
        let approvals = normalize_token_approvals(RawTokenApproval {
            to: vec![account(1), account(2), account(3)].into(),
            from: Some(vec![account(4), account(5)].into()),
            amount: 7.into(),
        });
        assert_eq!(approvals.len(), 3 * 2);
        assert_eq!(
            approvals[0],
            TokenApproval {
                to: account(1),
                from: Some(account(4)),
                amount: 7.into(),
            }
        );
        assert_eq!(
            approvals[5],
            TokenApproval {
                to: account(3),
                from: Some(account(5)),
                amount: 7.into(),
            }
        );
    }

    #[test]
    fn approvals_accept_mismatched_lengths() {
        let approvals = normalize_token_approvals(RawTokenApproval {
            to: account(1).into(),
            from: Some(vec![account(2), account(3)].into()),
            amount: 7.into(),
        });
        assert_eq!(approvals.len(), 2);
    }

    #[test]
    fn approval_batches_are_flattened() {
        let approvals = normalize_token_approvals(vec![
            RawTokenApproval {
                to: account(1).into(),
                from: None,
                amount: 1.into(),
            },
            RawTokenApproval {
                to: vec![account(2), account(3)].into(),
                from: Some(account(4).into()),
                amount: 2.into(),
            },
        ]);
        assert_eq!(approvals.len(), 3);
    }
}
