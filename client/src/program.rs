//! A typed handle to the deployed `protector` program.

use protector_interface::state::leader_schedule::SlotRange;
use solana_address::Address;
use solana_instruction::Instruction;
use solana_keypair::Keypair;
use solana_sdk::signature::{
    Signature,
    Signer,
};

use crate::{
    instructions,
    provider::Provider,
    transactions::{
        send_transaction_with_config,
        SendTransactionConfig,
    },
};

pub mod workspace {
    use super::*;

    /// Returns the handle for the `protector` program deployed at its declared id.
    pub fn protector(provider: Provider) -> Program {
        Program::new(instructions::program_id(), provider)
    }
}

pub struct Program {
    id: Address,
    provider: Provider,
}

impl Program {
    pub fn new(id: Address, provider: Provider) -> Self {
        Self { id, provider }
    }

    pub fn id(&self) -> Address {
        self.id
    }

    pub fn provider(&self) -> &Provider {
        &self.provider
    }

    /// An empty request paid for and signed by the provider's wallet.
    pub fn request(&self) -> RequestBuilder<'_> {
        RequestBuilder {
            program: self,
            instructions: vec![],
            signers: vec![],
            config: SendTransactionConfig::default(),
        }
    }

    pub fn initialize(&self) -> RequestBuilder<'_> {
        self.request().instruction(instructions::initialize())
    }

    pub fn initialize_bad_programs(&self) -> RequestBuilder<'_> {
        let authority = self.provider.payer.pubkey();
        self.request()
            .instruction(instructions::initialize_bad_programs(authority))
    }

    pub fn add_bad_program(&self, program: Address) -> RequestBuilder<'_> {
        let authority = self.provider.payer.pubkey();
        self.request()
            .instruction(instructions::add_bad_program(authority, program))
    }

    pub fn remove_bad_program(&self, program: Address) -> RequestBuilder<'_> {
        let authority = self.provider.payer.pubkey();
        self.request()
            .instruction(instructions::remove_bad_program(authority, program))
    }

    pub fn initialize_leader_schedule(&self) -> RequestBuilder<'_> {
        let authority = self.provider.payer.pubkey();
        self.request()
            .instruction(instructions::initialize_leader_schedule(authority))
    }

    pub fn set_leader_schedule(&self, reset: bool, ranges: &[SlotRange]) -> RequestBuilder<'_> {
        let authority = self.provider.payer.pubkey();
        self.request()
            .instruction(instructions::set_leader_schedule(authority, reset, ranges))
    }

    pub fn inspect(&self) -> RequestBuilder<'_> {
        self.request().instruction(instructions::inspect())
    }
}

pub struct RequestBuilder<'a> {
    program: &'a Program,
    instructions: Vec<Instruction>,
    signers: Vec<&'a Keypair>,
    config: SendTransactionConfig,
}

impl<'a> RequestBuilder<'a> {
    pub fn instruction(mut self, instruction: Instruction) -> Self {
        self.instructions.push(instruction);
        self
    }

    /// Adds a signer other than the provider's wallet.
    pub fn signer(mut self, signer: &'a Keypair) -> Self {
        self.signers.push(signer);
        self
    }

    pub fn compute_budget(mut self, compute_budget: u32) -> Self {
        self.config.compute_budget = Some(compute_budget);
        self
    }

    pub fn debug_logs(mut self, debug_logs: bool) -> Self {
        self.config.debug_logs = Some(debug_logs);
        self
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Sends the request, waits for confirmation and returns the transaction signature.
    pub async fn rpc(self) -> anyhow::Result<Signature> {
        let provider = &self.program.provider;
        send_transaction_with_config(
            &provider.rpc,
            &provider.payer,
            &self.signers,
            &self.instructions,
            Some(self.config),
        )
        .await
    }
}
